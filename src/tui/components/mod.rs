pub mod credentials_form;
pub mod dataset_bar;
pub mod filter_prompt;
pub mod record_table;
pub mod text_input;

pub use credentials_form::CredentialsForm;
pub use dataset_bar::DatasetBar;
pub use filter_prompt::FilterPrompt;
pub use record_table::RecordTable;
pub use text_input::{InputOutcome, TextInput};
