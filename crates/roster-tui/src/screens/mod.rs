pub mod detail;
pub mod students;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create every screen component, keyed by its id.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Students,
            Box::new(students::StudentsScreen::new()) as Box<dyn Component>,
        ),
        (ScreenId::Detail, Box::new(detail::DetailScreen::new())),
    ]
}
