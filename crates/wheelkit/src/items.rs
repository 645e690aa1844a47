use crate::error::WheelError;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Title(String);

crate::impl_text_newtype!(Title);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Description(String);

crate::impl_text_newtype!(Description);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ButtonLabel(String);

crate::impl_text_newtype!(ButtonLabel);

/// An item as written in the config. Every attribute is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ItemSpec {
    pub position: Option<u32>,
    pub title: Option<Title>,
    pub description: Option<Description>,
    pub button: Option<ButtonLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub index: usize,
    pub title: Title,
    pub description: Description,
    pub button_label: ButtonLabel,
}

#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: Vec<Item>,
}

impl ItemRegistry {
    /// Orders specs by `position`. The sort is stable, so unpositioned items
    /// follow the positioned ones in source order.
    pub fn load(specs: &[ItemSpec]) -> Self {
        let mut ordered: Vec<&ItemSpec> = specs.iter().collect();
        ordered.sort_by_key(|spec| spec.position.unwrap_or(u32::MAX));

        let items = ordered
            .into_iter()
            .enumerate()
            .map(|(index, spec)| {
                if spec.title.is_none() || spec.description.is_none() || spec.button.is_none() {
                    log::warn!("Item {} is missing attributes, rendering them empty", index);
                }
                Item {
                    index,
                    title: Title::or_empty(spec.title.clone()),
                    description: Description::or_empty(spec.description.clone()),
                    button_label: ButtonLabel::or_empty(spec.button.clone()),
                }
            })
            .collect();

        Self { items }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Item, WheelError> {
        self.items.get(index).ok_or(WheelError::IndexOutOfRange {
            index,
            count: self.items.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(position: Option<u32>, title: &str) -> ItemSpec {
        ItemSpec {
            position,
            title: Some(Title::new(title)),
            description: Some(Description::new(format!("{title} description"))),
            button: Some(ButtonLabel::new("Open")),
        }
    }

    #[test]
    fn test_load_orders_by_position() {
        let registry = ItemRegistry::load(&[
            spec(Some(3), "c"),
            spec(None, "z"),
            spec(Some(1), "a"),
            spec(Some(2), "b"),
        ]);

        let titles: Vec<_> = registry.iter().map(|i| i.title.to_string()).collect();
        assert_eq!(titles, ["a", "b", "c", "z"]);
        assert!(registry.iter().enumerate().all(|(i, item)| item.index == i));
    }

    #[test]
    fn test_missing_fields_load_empty() {
        let registry = ItemRegistry::load(&[ItemSpec {
            title: Some(Title::new("Only a title")),
            ..Default::default()
        }]);

        let item = registry.get(0).unwrap();
        assert_eq!(item.title.as_str(), "Only a title");
        assert!(item.description.is_empty());
        assert!(item.button_label.is_empty());
    }

    #[test]
    fn test_get_out_of_range() {
        let registry = ItemRegistry::load(&[spec(None, "a")]);
        assert_eq!(
            registry.get(1),
            Err(WheelError::IndexOutOfRange { index: 1, count: 1 })
        );
    }

    #[test]
    fn test_item_spec_deserialization() {
        let json = r#"{ "position": 2, "title": "Nebula", "button": "Explore" }"#;
        let spec: ItemSpec = serde_json::from_str(json).unwrap();

        assert_eq!(spec.position, Some(2));
        assert_eq!(spec.title, Some(Title::new("Nebula")));
        assert!(spec.description.is_none());
    }
}
