//! 最近一次验证结果的存储
//!
//! 每次新的验证都会覆盖存储内容，后续的路演材料生成读取它，
//! 不需要调用方携带标识。

use std::sync::RwLock;

use crate::service::ValidationReport;

/// 验证结果存储
pub trait ReportStore: Send + Sync {
    fn put(&self, report: ValidationReport);

    fn latest(&self) -> Option<ValidationReport>;
}

/// 进程内单槽存储
#[derive(Debug, Default)]
pub struct LastReportSlot {
    slot: RwLock<Option<ValidationReport>>,
}

impl LastReportSlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportStore for LastReportSlot {
    fn put(&self, report: ValidationReport) {
        // 锁中毒时直接接管其中的数据，单槽内容总是可以整体覆盖
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(report);
    }

    fn latest(&self) -> Option<ValidationReport> {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
