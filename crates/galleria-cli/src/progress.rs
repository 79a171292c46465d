//! Console progress reporting for scans.

use galleria_core::scan::ProgressReporter;

/// Prints one `[i/N]` line per completed detuning point.
///
/// Long scans only print every tenth point, plus the first and last.
pub struct ConsoleProgress;

impl ProgressReporter for ConsoleProgress {
    fn report(&mut self, current: usize, total: usize) {
        if total <= 20 || current % 10 == 0 || current == 1 || current == total {
            println!("  [{}/{}] detuning points settled", current, total);
        }
    }
}
