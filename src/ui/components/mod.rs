pub mod quantity_picker;
pub mod quota_bar;
pub mod submit_button;
pub mod toast;
