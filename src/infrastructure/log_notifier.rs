use crate::domain::notice::Notice;
use crate::domain::ports::Notifier;
use tracing::{info, warn};

/// Sends notices to the log instead of a toast.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        if notice.is_error() {
            warn!(target: "storefront::notice", "{notice}");
        } else {
            info!(target: "storefront::notice", "{notice}");
        }
    }
}
