use tracing::error;

/// Surfaces a fatal launcher error to the user.
pub trait Notifier {
    /// Blocks until the user has acknowledged the message.
    fn notify(&self, message: &str, title: &str);
}

/// Modal error box on Windows; elsewhere the log line is the only channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn notify(&self, message: &str, title: &str) {
        error!("{}: {}", title, message.replace('\n', " "));

        #[cfg(target_os = "windows")]
        {
            if let Err(e) = msgbox::create(title, message, msgbox::IconType::Error) {
                error!("Failed to show error dialog: {}", e);
            }
        }
    }
}
