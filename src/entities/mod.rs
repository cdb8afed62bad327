pub mod prelude;

pub mod ad_stats;
pub mod ads;
pub mod companies;
pub mod media_items;
