/// What the front end does when a single layer fails to lower
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerErrorPolicy {
    // Surface the first error and stop
    Abort,
    // Log the error, leave the model untouched for that layer and continue
    Skip,
}

#[derive(Clone, Debug)]
pub struct FrontEndConfig {
    /// Re-check each built stage against its own inputs before it is appended
    pub run_initial_check: bool,
    pub layer_error_policy: LayerErrorPolicy,
}

impl Default for FrontEndConfig {
    fn default() -> Self {
        Self {
            run_initial_check: true,
            layer_error_policy: LayerErrorPolicy::Abort,
        }
    }
}
