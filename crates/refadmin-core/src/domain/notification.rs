/// Who a push notification goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTarget {
    /// Broadcast to every user.
    All,
    Single(String),
    /// Ordered, deduplicated recipients.
    List(Vec<String>),
}
