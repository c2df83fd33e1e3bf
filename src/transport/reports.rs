use serde::Deserialize;

use super::envelope::{TransportError, decode_envelope};
use super::scalar::{TransportText, TransportTimestamp};
use crate::domain::{
    DeliveryRecord, DeliveryStatus, DetailedReportQuery, OperationResult, ReplyRecord, ReportQuery,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ReplyJson {
    #[serde(default)]
    sender: Option<TransportText>,
    #[serde(default)]
    sender_name: Option<TransportText>,
    received_date: TransportTimestamp,
    #[serde(default)]
    received_content: Option<TransportText>,
    #[serde(default)]
    sent_content: Option<TransportText>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DeliveryJson {
    #[serde(default)]
    sender: Option<TransportText>,
    #[serde(default)]
    receiver: Option<TransportText>,
    #[serde(default)]
    content: Option<TransportText>,
    #[serde(default)]
    system_message: Option<TransportText>,
    #[serde(default)]
    status: Option<TransportText>,
    request_date: TransportTimestamp,
    #[serde(default)]
    schedule_date: Option<TransportTimestamp>,
}

fn text(value: Option<TransportText>) -> String {
    value.map(TransportText::into_string).unwrap_or_default()
}

pub fn encode_reply_report_query(query: &ReportQuery) -> Vec<(String, String)> {
    vec![
        (ReportQuery::START_FIELD.to_owned(), query.start().to_string()),
        (ReportQuery::END_FIELD.to_owned(), query.end().to_string()),
    ]
}

pub fn encode_detailed_report_query(query: &DetailedReportQuery) -> Vec<(String, String)> {
    let mut params = encode_reply_report_query(query.range());
    params.push((
        DeliveryStatus::FIELD.to_owned(),
        query.status().as_str().to_owned(),
    ));
    params
}

pub fn decode_reply_report_response(
    json: &str,
) -> Result<OperationResult<Vec<ReplyRecord>>, TransportError> {
    decode_envelope::<Option<Vec<ReplyJson>>, _>(json, |object| {
        object
            .unwrap_or_default()
            .into_iter()
            .map(|reply| ReplyRecord {
                sender: text(reply.sender),
                sender_name: text(reply.sender_name),
                received_date: reply.received_date.into_timestamp(),
                received_content: text(reply.received_content),
                sent_content: text(reply.sent_content),
            })
            .collect()
    })
}

pub fn decode_detailed_report_response(
    json: &str,
) -> Result<OperationResult<Vec<DeliveryRecord>>, TransportError> {
    decode_envelope::<Option<Vec<DeliveryJson>>, _>(json, |object| {
        object
            .unwrap_or_default()
            .into_iter()
            .map(|message| DeliveryRecord {
                sender: text(message.sender),
                receiver: text(message.receiver),
                content: text(message.content),
                system_message: text(message.system_message),
                status: text(message.status),
                request_date: message.request_date.into_timestamp(),
                schedule_date: message
                    .schedule_date
                    .map(TransportTimestamp::into_timestamp),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::Timestamp;

    use super::*;

    fn ts(input: &str) -> Timestamp {
        Timestamp::parse("date", input).unwrap()
    }

    #[test]
    fn detailed_query_appends_status_filter() {
        let range = ReportQuery::new(ts("2024-01-01"), ts("2024-01-31 23:59:59")).unwrap();
        let params =
            encode_detailed_report_query(&DetailedReportQuery::new(range, DeliveryStatus::All));
        assert_eq!(
            params,
            vec![
                ("startDate".to_owned(), "2024-01-01 00:00:00".to_owned()),
                ("endDate".to_owned(), "2024-01-31 23:59:59".to_owned()),
                ("delivered".to_owned(), "all".to_owned()),
            ]
        );
    }

    #[test]
    fn decode_detailed_report_preserves_order_and_optional_schedule() {
        let json = r#"
        {
          "Success": true,
          "Message": "",
          "Object": [
            {
              "Sender": "5511999990000",
              "Receiver": "5511888880000",
              "Content": "hi",
              "SystemMessage": null,
              "Status": "Delivered",
              "RequestDate": "2024-01-01T10:00:00",
              "ScheduleDate": null
            },
            {
              "Sender": "5511999990000",
              "Receiver": "5511777770000",
              "Content": "later",
              "SystemMessage": "queued",
              "Status": 0,
              "RequestDate": "2024-01-01T09:00:00",
              "ScheduleDate": "2024-01-02T08:00:00"
            }
          ]
        }
        "#;

        let result = decode_detailed_report_response(json).unwrap();
        assert!(result.success);
        let records = result.payload.unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].receiver, "5511888880000");
        assert_eq!(records[0].system_message, "");
        assert_eq!(records[0].status, "Delivered");
        assert_eq!(records[0].schedule_date, None);

        assert_eq!(records[1].receiver, "5511777770000");
        assert_eq!(records[1].status, "0");
        assert_eq!(records[1].schedule_date, Some(ts("2024-01-02 08:00:00")));
    }

    #[test]
    fn decode_reply_report_maps_fields() {
        let json = r#"
        {
          "Success": true,
          "Message": "ok",
          "Object": [
            {
              "Sender": "5511888880000",
              "SenderName": "Maria",
              "ReceivedDate": "2024-03-05T14:15:16",
              "ReceivedContent": "sim",
              "SentContent": "confirma?"
            }
          ]
        }
        "#;

        let records = decode_reply_report_response(json).unwrap().payload.unwrap();
        assert_eq!(
            records,
            vec![ReplyRecord {
                sender: "5511888880000".to_owned(),
                sender_name: "Maria".to_owned(),
                received_date: ts("2024-03-05 14:15:16"),
                received_content: "sim".to_owned(),
                sent_content: "confirma?".to_owned(),
            }]
        );
    }

    #[test]
    fn null_object_on_success_is_empty_report() {
        let json = r#"{"Success":true,"Message":"","Object":null}"#;
        let records = decode_reply_report_response(json).unwrap().payload.unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn malformed_record_is_a_parse_error() {
        let json = r#"{"Success":true,"Object":[{"Sender":"x","RequestDate":"yesterday"}]}"#;
        assert!(decode_detailed_report_response(json).is_err());
    }
}
