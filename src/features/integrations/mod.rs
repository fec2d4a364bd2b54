// 外部連携（メッセージング・キャッシュ）モジュール
//
// いずれもfire-and-forgetの助言的シグナルであり、
// 連携先の不在がコア操作を妨げることはない。

pub mod cache;
pub mod notifier;

pub use cache::CacheInvalidator;
pub use notifier::{NotificationEvent, NotificationKind, Notifier};
