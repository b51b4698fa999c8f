use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use dynamodb_client::DynamodbClient;

use crate::domain::{
    models::{AGE_FIELD, ID_FIELD, TransformedRecord},
    ports::ItemStore,
};

pub struct DynamodbItemStore {
    inner: DynamodbClient,
}

impl DynamodbItemStore {
    pub fn new(inner: DynamodbClient) -> Self {
        DynamodbItemStore { inner }
    }
}

/// `age` is stored as a number, every other column as a string
fn to_item(record: TransformedRecord) -> HashMap<String, AttributeValue> {
    let TransformedRecord {
        id,
        age,
        attributes,
    } = record;

    let mut item: HashMap<String, AttributeValue> = attributes
        .into_iter()
        .map(|(name, value)| (name, AttributeValue::S(value)))
        .collect();

    item.insert(ID_FIELD.to_string(), AttributeValue::S(id));
    item.insert(AGE_FIELD.to_string(), AttributeValue::N(age.to_string()));

    item
}

impl ItemStore for DynamodbItemStore {
    fn put_item(
        &self,
        record: TransformedRecord,
    ) -> impl Future<Output = anyhow::Result<()>> + Send {
        self.inner.put_item(to_item(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn it_converts_a_record_into_an_item() {
        let item = to_item(TransformedRecord {
            id: "1".to_string(),
            age: -30,
            attributes: BTreeMap::from([
                ("name".to_string(), "Ada".to_string()),
                ("city".to_string(), String::new()),
            ]),
        });

        assert_eq!(
            item,
            HashMap::from([
                ("id".to_string(), AttributeValue::S("1".to_string())),
                ("age".to_string(), AttributeValue::N("-30".to_string())),
                ("name".to_string(), AttributeValue::S("Ada".to_string())),
                ("city".to_string(), AttributeValue::S(String::new())),
            ])
        );
    }
}
