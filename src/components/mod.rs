pub mod action_list;
pub mod form;
pub mod output_view;
pub mod text_field;

pub use action_list::ActionList;
pub use form::Forms;
pub use output_view::OutputAreas;
