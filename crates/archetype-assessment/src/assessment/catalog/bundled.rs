use super::super::domain::{CategoryDefinition, CategoryId};
use super::{CatalogError, StaticCatalogBuilder};

const LEADERSHIP: &str = include_str!("data/leadership.json");
const MIDDLE_MANAGEMENT: &str = include_str!("data/middle_management.json");

pub(super) fn register(builder: StaticCatalogBuilder) -> StaticCatalogBuilder {
    builder
        .register(CategoryId::new("leadership"), "Leadership", || {
            parse("leadership", LEADERSHIP)
        })
        .register(
            CategoryId::new("middle_management"),
            "Middle Management",
            || parse("middle_management", MIDDLE_MANAGEMENT),
        )
}

fn parse(id: &str, raw: &str) -> Result<CategoryDefinition, CatalogError> {
    serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
        category: CategoryId::new(id),
        source,
    })
}
