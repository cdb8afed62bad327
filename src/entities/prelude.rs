pub use super::ad_stats::Entity as AdStats;
pub use super::ads::Entity as Ads;
pub use super::companies::Entity as Companies;
pub use super::media_items::Entity as MediaItems;
