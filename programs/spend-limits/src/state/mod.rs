mod vault;
pub use vault::*;

mod quota_record;
pub use quota_record::*;
