pub mod ad;
pub mod ad_stat;
pub mod company;
pub mod dashboard;
pub mod media;

pub use ad::*;
pub use ad_stat::*;
pub use company::*;
pub use dashboard::*;
pub use media::*;
