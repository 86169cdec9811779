//! Widget styles with shadows, gradients, and rounded corners.

mod buttons;
mod containers;
mod inputs;
pub mod palette;
mod shadows;

pub use containers::{
    background_style, badge_style, banner_style, card_style, header_style, panel_style,
    score_card_style, step_circle_style, step_connector_style,
};

pub use buttons::{
    primary_button_style, secondary_button_style, success_button_style, toolbar_button_style,
};

pub use inputs::{form_input_style, scrollable_style};
