// tests/support/mocks/categories.rs
use async_trait::async_trait;
use shiori_core::domain::category::{CategoryId, CategoryRepository, CategoryView};
use shiori_core::domain::errors::{DomainError, DomainResult};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// カテゴリビューのインメモリ実装（挿入順を保持）
#[derive(Default)]
pub struct InMemoryCategoryRepo {
    rows: Mutex<Vec<CategoryView>>,
    fail: AtomicBool,
}

impl InMemoryCategoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, id: i64, name: &str, parent_id: i64) {
        self.rows
            .lock()
            .unwrap()
            .push(CategoryView::new(id, name, parent_id));
    }

    /// 以降の呼び出しをすべて失敗させる
    pub fn fail_lookups(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> DomainResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("category store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepo {
    async fn list_views(&self) -> DomainResult<Vec<CategoryView>> {
        self.check()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<CategoryView>> {
        self.check()?;
        let id = i64::from(id);
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned())
    }
}
