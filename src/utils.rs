use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner().with_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]").expect("hardcoded"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
