//! User decision points.
//!
//! Every place that would ask a person something goes through [`Prompter`]:
//! ambiguous catalog files, add vs. replace of a component, and the notice
//! listing components merged from the registry. Declining is a normal answer,
//! not an error.

use tracing::info;

pub trait Prompter {
    /// Ask a yes/no question; `true` means proceed
    fn confirm(&mut self, message: &str) -> bool;

    /// Show the formulas just merged into a catalog (already sorted)
    fn report_new_components(&mut self, formulas: &[String]);
}

/// Answers yes to everything and logs reports
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&mut self, message: &str) -> bool {
        info!("{message} [assumed yes]");
        true
    }

    fn report_new_components(&mut self, formulas: &[String]) {
        info!("New components: {}", formulas.join(", "));
    }
}

/// Answers no to everything and logs reports
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeNo;

impl Prompter for AssumeNo {
    fn confirm(&mut self, message: &str) -> bool {
        info!("{message} [assumed no]");
        false
    }

    fn report_new_components(&mut self, formulas: &[String]) {
        info!("New components: {}", formulas.join(", "));
    }
}
