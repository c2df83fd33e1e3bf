use serde_json::{Map, Value};

use crate::domain::{
    ContextMessage, ContextName, ContextSchedule, MessageText, Receiver, ScheduleMessage,
    SendMessage, SenderId, Timestamp,
};

const SCHEDULE_DATE_FIELD: &str = "ScheduleDate";

pub fn encode_send_body(request: &SendMessage) -> Value {
    let mut body = Map::new();
    body.insert(
        SenderId::FIELD.to_owned(),
        Value::from(request.sender().as_str()),
    );
    body.insert(
        MessageText::FIELD.to_owned(),
        Value::from(request.content().as_str()),
    );
    push_receivers(&mut body, request.receivers());
    Value::Object(body)
}

pub fn encode_schedule_body(request: &ScheduleMessage) -> Value {
    let mut body = Map::new();
    let message = request.message();
    body.insert(
        SenderId::FIELD.to_owned(),
        Value::from(message.sender().as_str()),
    );
    body.insert(
        MessageText::FIELD.to_owned(),
        Value::from(message.content().as_str()),
    );
    push_schedule_date(&mut body, request.schedule_date());
    push_receivers(&mut body, message.receivers());
    Value::Object(body)
}

pub fn encode_context_body(request: &ContextMessage) -> Value {
    let mut body = Map::new();
    body.insert(
        SenderId::FIELD.to_owned(),
        Value::from(request.sender().as_str()),
    );
    body.insert(
        ContextName::FIELD.to_owned(),
        Value::from(request.context().as_str()),
    );
    push_receivers(&mut body, request.receivers());
    Value::Object(body)
}

pub fn encode_context_schedule_body(request: &ContextSchedule) -> Value {
    let mut body = Map::new();
    let message = request.message();
    body.insert(
        SenderId::FIELD.to_owned(),
        Value::from(message.sender().as_str()),
    );
    body.insert(
        ContextName::FIELD.to_owned(),
        Value::from(message.context().as_str()),
    );
    push_schedule_date(&mut body, request.schedule_date());
    push_receivers(&mut body, message.receivers());
    Value::Object(body)
}

fn push_schedule_date(body: &mut Map<String, Value>, date: Timestamp) {
    body.insert(SCHEDULE_DATE_FIELD.to_owned(), Value::from(date.to_string()));
}

fn push_receivers(body: &mut Map<String, Value>, receivers: &[Receiver]) {
    let joined = receivers
        .iter()
        .map(Receiver::raw)
        .collect::<Vec<_>>()
        .join(",");
    body.insert(Receiver::FIELD.to_owned(), Value::from(joined));
}
