use services::QuizController;
use tokio::task::{JoinError, JoinHandle};

/// A bank fetch running beside the input loop.
pub type LoadTask = JoinHandle<bool>;

/// Fetch the bank the controller is loading. The controller must already be
/// in `Loading` so the next render shows it.
pub fn spawn_load(controller: &QuizController) -> LoadTask {
    let controller = controller.clone();
    tokio::spawn(async move { controller.load().await })
}

/// Resolves when the running fetch completes; never resolves when idle.
pub async fn finished(task: &mut Option<LoadTask>) -> Result<bool, JoinError> {
    match task.as_mut() {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}
