pub mod analysis;
pub mod confirm_quit;
pub mod input;
pub mod result;

// Re-exports so you can keep using crate::screens::XYZScreen
pub use analysis::AnalysisScreen;
pub use confirm_quit::ConfirmQuitScreen;
pub use input::InputScreen;
pub use result::ResultScreen;

use crate::app::ScreenWidget;
use crate::types::{WorkflowState, WorkflowStep};

/// The screen that renders `state.step`.
pub fn screen_for(state: &WorkflowState) -> Box<dyn ScreenWidget> {
    match state.step {
        WorkflowStep::Input => Box::new(InputScreen::new(&state.original_script)),
        WorkflowStep::Analysis => Box::new(AnalysisScreen::default()),
        WorkflowStep::Generation => Box::new(ResultScreen::default()),
    }
}
