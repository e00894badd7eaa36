use time::OffsetDateTime;

/// 时间来源，测试里可以固定
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// 当前 Unix 时间（秒）
    fn unix_timestamp(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        OffsetDateTime::now_utc().unix_timestamp()
    }
}
