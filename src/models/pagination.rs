use serde::Serialize;

/// Pagination metadata computed over the full filtered pool, not just the
/// returned page.
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub last_page: i64,
}

impl PageMeta {
    pub fn new(current_page: i64, per_page: i64, total: i64) -> Self {
        let last_page = ((total + per_page - 1) / per_page).max(1);
        Self {
            current_page,
            per_page,
            total,
            last_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_rounds_up() {
        assert_eq!(PageMeta::new(1, 20, 0).last_page, 1);
        assert_eq!(PageMeta::new(1, 20, 20).last_page, 1);
        assert_eq!(PageMeta::new(1, 20, 21).last_page, 2);
        assert_eq!(PageMeta::new(1, 20, 150).last_page, 8);
    }
}
