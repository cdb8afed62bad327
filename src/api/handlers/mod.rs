pub mod ad_stats;
pub mod ads;
pub mod companies;
pub mod dashboard;
pub mod health;
pub mod media;
