use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for `len` units of work. Returns `None` when there is
/// nothing to track or the template is rejected.
pub fn progress_bar(len: u64, msg: String) -> Option<ProgressBar> {
    if len == 0 {
        return None;
    }

    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise} / {eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
        .ok()?
        .progress_chars("##-");

    let bar = ProgressBar::new(len).with_style(style).with_message(msg);

    Some(bar)
}
