use crate::core::{Catalog, LabeledItem};
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;

type Attributes = HashMap<String, AttributeValue>;

const KEY_ATTRIBUTE: &str = "key";
const LABELS_ATTRIBUTE: &str = "labels";

#[derive(Debug, Clone)]
pub struct DynamoCatalog {
    client: DynamoClient,
    table: String,
}

impl DynamoCatalog {
    pub fn new(client: DynamoClient, table: String) -> Self {
        Self { client, table }
    }
}

#[async_trait]
impl Catalog for DynamoCatalog {
    /// Scans every page of the table.
    async fn scan_all(&self) -> Result<Vec<LabeledItem>> {
        let mut items = Vec::new();
        let mut start_key: Option<Attributes> = None;
        let mut pages = 0usize;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|err| {
                    ServiceError::persistence(format!(
                        "scan {}: {}",
                        self.table,
                        DisplayErrorContext(&err)
                    ))
                })?;
            pages += 1;

            for attributes in output.items() {
                items.push(item_from_attributes(attributes)?);
            }

            match output.last_evaluated_key() {
                Some(last) if !last.is_empty() => start_key = Some(last.clone()),
                _ => break,
            }
        }

        tracing::debug!("Scanned {} items from {} in {} pages", items.len(), self.table, pages);
        Ok(items)
    }

    async fn put(&self, item: &LabeledItem) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item_to_attributes(item)))
            .send()
            .await
            .map_err(|err| {
                ServiceError::persistence(format!(
                    "put {} into {}: {}",
                    item.key,
                    self.table,
                    DisplayErrorContext(&err)
                ))
            })?;
        Ok(())
    }
}

pub(crate) fn item_to_attributes(item: &LabeledItem) -> Attributes {
    HashMap::from([
        (KEY_ATTRIBUTE.to_string(), AttributeValue::S(item.key.clone())),
        (
            LABELS_ATTRIBUTE.to_string(),
            AttributeValue::L(
                item.labels
                    .iter()
                    .map(|label| AttributeValue::S(label.clone()))
                    .collect(),
            ),
        ),
    ])
}

/// Missing or null attributes are rejected rather than read as empty.
pub(crate) fn item_from_attributes(attributes: &Attributes) -> Result<LabeledItem> {
    let key = match attributes.get(KEY_ATTRIBUTE) {
        Some(AttributeValue::S(key)) => key.clone(),
        other => {
            return Err(ServiceError::invalid_argument(format!(
                "catalog item has no string '{}' attribute (found {:?})",
                KEY_ATTRIBUTE, other
            )))
        }
    };

    let labels = match attributes.get(LABELS_ATTRIBUTE) {
        Some(AttributeValue::L(values)) => values
            .iter()
            .map(|value| match value {
                AttributeValue::S(label) => Ok(label.clone()),
                other => Err(ServiceError::invalid_argument(format!(
                    "catalog item {} has a non-string label: {:?}",
                    key, other
                ))),
            })
            .collect::<Result<Vec<String>>>()?,
        other => {
            return Err(ServiceError::invalid_argument(format!(
                "catalog item {} has no list '{}' attribute (found {:?})",
                key, LABELS_ATTRIBUTE, other
            )))
        }
    };

    Ok(LabeledItem { key, labels })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_round_trip_keeps_duplicates_and_order() {
        let item = LabeledItem::new(
            "cat.jpg",
            vec!["Cat".to_string(), "Pet".to_string(), "Cat".to_string()],
        );

        let attributes = item_to_attributes(&item);
        assert_eq!(
            attributes.get("key"),
            Some(&AttributeValue::S("cat.jpg".to_string()))
        );

        assert_eq!(item_from_attributes(&attributes).unwrap(), item);
    }

    #[test]
    fn test_null_labels_are_rejected() {
        let attributes = HashMap::from([
            ("key".to_string(), AttributeValue::S("a".to_string())),
            ("labels".to_string(), AttributeValue::Null(true)),
        ]);

        assert!(matches!(
            item_from_attributes(&attributes),
            Err(ServiceError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_missing_attributes_are_rejected() {
        let no_labels = HashMap::from([("key".to_string(), AttributeValue::S("a".to_string()))]);
        assert!(item_from_attributes(&no_labels).is_err());

        let no_key = HashMap::from([("labels".to_string(), AttributeValue::L(vec![]))]);
        assert!(item_from_attributes(&no_key).is_err());
    }

    #[test]
    fn test_non_string_label_is_rejected() {
        let attributes = HashMap::from([
            ("key".to_string(), AttributeValue::S("a".to_string())),
            (
                "labels".to_string(),
                AttributeValue::L(vec![AttributeValue::N("3".to_string())]),
            ),
        ]);

        assert!(item_from_attributes(&attributes).is_err());
    }

    #[test]
    fn test_empty_label_list_is_valid() {
        let attributes = HashMap::from([
            ("key".to_string(), AttributeValue::S("a".to_string())),
            ("labels".to_string(), AttributeValue::L(vec![])),
        ]);

        assert!(item_from_attributes(&attributes).unwrap().labels.is_empty());
    }
}
