use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

pub struct ProgressReporter {
    term: Term,
    spinner_position: AtomicUsize,
    multi_progress: MultiProgress,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        let term = Term::stderr();
        Self {
            term,
            spinner_position: AtomicUsize::new(0),
            multi_progress: MultiProgress::new(),
            current_bar: None,
        }
    }

    fn create_spinner(&mut self, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(SPINNER_TEMPLATE)
                .expect("Spinner template should be valid")
                .tick_strings(&["🔭 ", "🔭·", "🔭∘", "🔭○", "🔭◎", "🔭●", "🔭◉", "🔭✶", "✓"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn frame(&self) -> &'static str {
        let pos = self.spinner_position.fetch_add(1, Ordering::Relaxed) % SPINNER_FRAMES.len();
        SPINNER_FRAMES[pos]
    }

    pub fn start_scan(&mut self, root: &Path) {
        let _ = self.term.clear_line();
        eprintln!(
            "{} Scanning {} for projects...",
            style("🔍").cyan(),
            style(root.display()).bold()
        );
        let spinner = self.create_spinner("Looking for manifests...");
        self.current_bar = Some(spinner);
    }

    pub fn checking_directory(&self, path: &Path) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Checking: {}...", path.display()));
        } else {
            let _ = self.term.clear_line();
            eprint!(
                "\r{} Checking: {}... ",
                style(self.frame()).cyan(),
                style(path.display()).dim()
            );
        }
    }

    pub fn finish_scan(&mut self, count: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        if count == 0 {
            eprintln!("\r{} No projects found", style("✗").red());
        } else {
            eprintln!(
                "\r{} Scan complete: found {} project{}",
                style("✓").green(),
                style(count).yellow().bold(),
                if count == 1 { "" } else { "s" }
            );
        }
    }

    pub fn start_analysis(&mut self) {
        eprintln!("\n{} Analyzing dependencies...", style("📊").yellow());
    }

    pub fn finish_analysis(&self, dependency_count: usize) {
        eprintln!(
            "{} Analyzed {} dependency occurrence{}",
            style("✓").green().bold(),
            style(dependency_count).yellow(),
            if dependency_count == 1 { "" } else { "s" }
        );
    }

    pub fn start_global_scan(&mut self) {
        let _ = self.term.clear_line();
        eprintln!(
            "{} Probing package managers...",
            style("🌍").cyan()
        );
        let spinner = self.create_spinner("Asking managers for their inventories...");
        self.current_bar = Some(spinner);
    }

    pub fn probing_manager(&self, manager: &str) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Probing: {manager}..."));
        }
    }

    pub fn finish_global_scan(&mut self, count: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        eprintln!(
            "\r{} Found {} global {}",
            style("✓").green(),
            style(count).yellow().bold(),
            if count == 1 {
                "dependency"
            } else {
                "dependencies"
            }
        );
    }
}
