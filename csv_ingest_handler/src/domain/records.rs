use std::io::Read;
use std::num::IntErrorKind;

use csv::{ReaderBuilder, StringRecord};
use lambda_runtime::tracing;

use crate::domain::models::{AGE_FIELD, ID_FIELD, IngestErr, RawRecord, TransformedRecord};

/// Lazily yields the data rows of a comma separated file whose first line is the header.
///
/// Rows never have to match the header length: fields past the last header are dropped and
/// missing trailing fields are simply absent from the [RawRecord].
pub struct RecordReader<R: Read> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    record: StringRecord,
    row: usize,
}

impl<R: Read> RecordReader<R> {
    pub fn new(input: R) -> Result<Self, IngestErr> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader
            .headers()
            .map_err(|source| IngestErr::Parse { row: 0, source })?
            .iter()
            .map(str::to_string)
            .collect();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            row: 0,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn to_raw_record(&self) -> RawRecord {
        if self.record.len() != self.headers.len() {
            tracing::debug!(
                row = self.row,
                expected = self.headers.len(),
                actual = self.record.len(),
                "row length does not match header"
            );
        }

        // zip stops at the shorter side which drops overflow fields
        let fields = self
            .headers
            .iter()
            .zip(self.record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();

        RawRecord {
            row: self.row,
            fields,
        }
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<RawRecord, IngestErr>;

    fn next(&mut self) -> Option<Self::Item> {
        self.row += 1;
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(Ok(self.to_raw_record())),
            Ok(false) => None,
            Err(source) => Some(Err(IngestErr::Parse {
                row: self.row,
                source,
            })),
        }
    }
}

/// Coerces `id` to a string and `age` to an integer, passing every other column through.
pub fn transform(record: RawRecord) -> Result<TransformedRecord, IngestErr> {
    let RawRecord { row, mut fields } = record;

    let id = fields.remove(ID_FIELD).ok_or(IngestErr::MissingField {
        row,
        field: ID_FIELD,
    })?;

    let raw_age = fields.remove(AGE_FIELD).ok_or(IngestErr::MissingField {
        row,
        field: AGE_FIELD,
    })?;

    let age = raw_age.trim().parse::<i128>().map_err(|source| match source.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => IngestErr::FieldOutOfRange {
            row,
            field: AGE_FIELD,
            value: raw_age.clone(),
        },
        _ => IngestErr::FieldCoercion {
            row,
            field: AGE_FIELD,
            value: raw_age.clone(),
            source,
        },
    })?;

    Ok(TransformedRecord {
        id,
        age,
        attributes: fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cool_asserts::assert_matches;
    use std::collections::BTreeMap;

    fn read_all(input: &str) -> Vec<RawRecord> {
        RecordReader::new(input.as_bytes())
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn raw(row: usize, fields: &[(&str, &str)]) -> RawRecord {
        RawRecord {
            row,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn it_maps_rows_onto_the_header() {
        let records = read_all("id,age,name\n1,30,Ada\n2,25,\"Lovelace, Jr\"\n");

        assert_eq!(
            records,
            vec![
                raw(1, &[("id", "1"), ("age", "30"), ("name", "Ada")]),
                raw(2, &[("id", "2"), ("age", "25"), ("name", "Lovelace, Jr")]),
            ]
        );
    }

    #[test]
    fn it_accepts_crlf_line_endings() {
        let records = read_all("id,age\r\n1,30\r\n");

        assert_eq!(records, vec![raw(1, &[("id", "1"), ("age", "30")])]);
    }

    #[test]
    fn it_yields_nothing_for_a_header_only_file() {
        let reader = RecordReader::new("id,age\n".as_bytes()).unwrap();

        assert_eq!(reader.headers(), ["id", "age"]);
        assert_eq!(reader.count(), 0);
    }

    #[test]
    fn it_yields_nothing_for_an_empty_file() {
        assert!(read_all("").is_empty());
    }

    #[test]
    fn it_leaves_missing_trailing_fields_absent() {
        let records = read_all("id,age,name\n1\n");

        assert_eq!(records, vec![raw(1, &[("id", "1")])]);
    }

    #[test]
    fn it_drops_fields_past_the_header() {
        let records = read_all("id,age\n1,30,extra,more\n");

        assert_eq!(records, vec![raw(1, &[("id", "1"), ("age", "30")])]);
    }

    #[test]
    fn it_is_lazy() {
        let mut reader = RecordReader::new("id,age\n1,30\n2,25\n".as_bytes()).unwrap();

        assert_eq!(reader.next().unwrap().unwrap().row, 1);
        assert_eq!(reader.next().unwrap().unwrap().row, 2);
        assert!(reader.next().is_none());
    }

    #[test]
    fn it_transforms_id_and_age() {
        let record = transform(raw(1, &[("id", "1"), ("age", " 30 "), ("name", "Ada")])).unwrap();

        assert_eq!(
            record,
            TransformedRecord {
                id: "1".to_string(),
                age: 30,
                attributes: BTreeMap::from([("name".to_string(), "Ada".to_string())]),
            }
        );
    }

    #[test]
    fn it_accepts_signed_ages() {
        assert_eq!(transform(raw(1, &[("id", "a"), ("age", "-4")])).unwrap().age, -4);
        assert_eq!(transform(raw(1, &[("id", "a"), ("age", "+4")])).unwrap().age, 4);
    }

    #[test]
    fn it_accepts_ages_wider_than_64_bits() {
        let record = transform(raw(1, &[("id", "1"), ("age", "99999999999999999999")])).unwrap();

        assert_eq!(record.age, 99_999_999_999_999_999_999);
    }

    #[test]
    fn it_reports_an_age_too_large_to_store() {
        let value = "9".repeat(40);

        assert_matches!(
            transform(raw(2, &[("id", "1"), ("age", value.as_str())])),
            Err(err @ IngestErr::FieldOutOfRange { row: 2, field: "age", .. }) => assert_eq!(
                err.to_string(),
                format!("row 2 has 'age' value '{value}' which is too large to store")
            )
        );
    }

    #[test]
    fn it_rejects_a_non_integer_age() {
        assert_matches!(
            transform(raw(3, &[("id", "1"), ("age", "thirty")])),
            Err(IngestErr::FieldCoercion { row: 3, field: "age", value, .. }) => assert_eq!(value, "thirty")
        );
        assert_matches!(
            transform(raw(1, &[("id", "1"), ("age", "30.5")])),
            Err(IngestErr::FieldCoercion { .. })
        );
        assert_matches!(
            transform(raw(1, &[("id", "1"), ("age", "")])),
            Err(IngestErr::FieldCoercion { .. })
        );
    }

    #[test]
    fn it_rejects_missing_required_fields() {
        assert_matches!(
            transform(raw(2, &[("age", "30")])),
            Err(IngestErr::MissingField { row: 2, field: "id" })
        );
        assert_matches!(
            transform(raw(2, &[("id", "1")])),
            Err(IngestErr::MissingField { row: 2, field: "age" })
        );
    }
}
