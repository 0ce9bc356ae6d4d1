use tracing::debug;

/// Upper epoch bounds (exclusive) and the rate used below each
const STEPS: [(u32, f32); 8] = [
    (1, 4e-4),
    (2, 3.2e-4),
    (4, 2.4e-4),
    (6, 2e-4),
    (8, 1.6e-4),
    (12, 1.2e-4),
    (18, 1.1e-4),
    (30, 1e-4),
];

const FINAL_RATE: f32 = 9.6e-5;

/// Reference piecewise-constant learning rate for a zero-based epoch
pub fn learning_rate(epoch: u32) -> f32 {
    STEPS
        .iter()
        .find(|(bound, _)| epoch < *bound)
        .map(|&(_, rate)| rate)
        .unwrap_or(FINAL_RATE)
}

/// `learning_rate`, logging the previous epoch's rate when `verbose` is set
pub fn learning_rate_logged(epoch: u32, verbose: bool) -> f32 {
    if verbose && epoch > 0 {
        debug!(
            "# Starting epoch {:2}, learning rate used in the last epoch = {:.6}",
            epoch + 1,
            learning_rate(epoch - 1)
        );
    }
    learning_rate(epoch)
}
