use std::future::Future;
use std::time::Duration;

/// Опрашивает `attempt` каждые `interval`, пока он не вернёт значение.
///
/// Возвращает `None`, если за `deadline` значение так и не появилось.
/// Первая попытка выполняется сразу, без ожидания.
pub async fn poll_until<T, F, Fut>(interval: Duration, deadline: Duration, mut attempt: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let attempts = async {
        loop {
            if let Some(value) = attempt().await {
                return value;
            }
            tokio::time::sleep(interval).await;
        }
    };

    tokio::time::timeout(deadline, attempts).await.ok()
}
