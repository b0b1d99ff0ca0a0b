pub mod artifact;
pub mod classpath;
pub mod folders;
pub mod task;

pub use artifact::find_payload_artifact;
pub use classpath::{get_classpath_separator, LaunchConfiguration};
pub use folders::{all_required_folders_present, first_missing_folder};
pub use task::{build_command, LaunchCommand, ProcessRunner, SystemProcessRunner};
