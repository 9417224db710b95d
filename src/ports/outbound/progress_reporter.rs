/// ProgressReporter port for user feedback during an analysis run
///
/// Domain services never print; the use case reports stages, paged fetch
/// progress and diagnostics (removed cycle edges, unmatched ownership
/// entries) through this port.
pub trait ProgressReporter {
    /// Reports a stage message
    fn report(&self, message: &str);

    /// Reports progress of a counted operation such as paged alert fetching
    ///
    /// # Arguments
    /// * `current` - Items processed so far
    /// * `total` - Total expected items
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a recoverable problem that does not stop the run
    fn report_warning(&self, message: &str);

    /// Reports an error message
    fn report_error(&self, message: &str);

    /// Reports completion of the run
    fn report_completion(&self, message: &str);
}
