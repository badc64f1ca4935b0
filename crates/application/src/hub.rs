//! 通知中心
//!
//! 维护当前在线的观察者集合，把每个事件按注册顺序投递给
//! 所有观察者。投递走无界 mpsc 通道，永远不会阻塞编排服务；
//! 发送失败说明对端已断开，按隐式退订处理并记录日志。

use async_trait::async_trait;
use domain::NotificationEvent;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// 事件广播端口
#[async_trait]
pub trait EventBroadcaster: Send + Sync {
    async fn broadcast(&self, event: NotificationEvent);
}

/// 订阅返回的观察者句柄
pub struct ObserverHandle {
    pub id: Uuid,
    pub receiver: mpsc::UnboundedReceiver<NotificationEvent>,
}

struct Observer {
    id: Uuid,
    sender: mpsc::UnboundedSender<NotificationEvent>,
}

/// 进程内通知中心
pub struct NotificationHub {
    // Vec 保持注册顺序，广播按此顺序投递
    observers: RwLock<Vec<Observer>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
        }
    }

    /// 注册新观察者
    pub async fn subscribe(&self) -> ObserverHandle {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();

        let mut observers = self.observers.write().await;
        observers.push(Observer { id, sender });
        drop(observers);

        tracing::debug!(observer_id = %id, "observer subscribed");
        ObserverHandle { id, receiver }
    }

    /// 注销观察者，之后的广播不再投递给它
    pub async fn unsubscribe(&self, id: Uuid) {
        let mut observers = self.observers.write().await;
        observers.retain(|observer| observer.id != id);
        drop(observers);

        tracing::debug!(observer_id = %id, "observer unsubscribed");
    }

    /// 当前在线观察者数量
    pub async fn observer_count(&self) -> usize {
        self.observers.read().await.len()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBroadcaster for NotificationHub {
    async fn broadcast(&self, event: NotificationEvent) {
        let mut observers = self.observers.write().await;
        observers.retain(|observer| {
            match observer.sender.send(event.clone()) {
                Ok(()) => true,
                Err(_) => {
                    // 对端已断开，显式移除而不是静默忽略
                    tracing::warn!(
                        observer_id = %observer.id,
                        event_type = event.event_type(),
                        "observer connection dead, removing from hub"
                    );
                    false
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::SystemStatus;

    fn status_event() -> NotificationEvent {
        NotificationEvent::SystemStatus(SystemStatus::idle(Utc::now()))
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_observers_in_order() {
        let hub = NotificationHub::new();
        let mut first = hub.subscribe().await;
        let mut second = hub.subscribe().await;

        let event = status_event();
        hub.broadcast(event.clone()).await;
        hub.broadcast(NotificationEvent::ApplicantDeleted { id: Uuid::new_v4() })
            .await;

        assert_eq!(first.receiver.recv().await.unwrap(), event);
        assert_eq!(second.receiver.recv().await.unwrap(), event);
        assert_eq!(
            first.receiver.recv().await.unwrap().event_type(),
            "applicant_deleted"
        );
        assert_eq!(
            second.receiver.recv().await.unwrap().event_type(),
            "applicant_deleted"
        );
    }

    #[tokio::test]
    async fn test_dead_observer_is_removed_without_affecting_others() {
        let hub = NotificationHub::new();
        let mut first = hub.subscribe().await;
        let dropped = hub.subscribe().await;
        let mut third = hub.subscribe().await;

        // 模拟断开的连接
        drop(dropped.receiver);
        assert_eq!(hub.observer_count().await, 3);

        let event = status_event();
        hub.broadcast(event.clone()).await;

        assert_eq!(hub.observer_count().await, 2);
        assert_eq!(first.receiver.recv().await.unwrap(), event);
        assert_eq!(third.receiver.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let hub = NotificationHub::new();
        let mut handle = hub.subscribe().await;

        hub.unsubscribe(handle.id).await;
        assert_eq!(hub.observer_count().await, 0);

        hub.broadcast(status_event()).await;
        assert!(handle.receiver.try_recv().is_err());
    }
}
