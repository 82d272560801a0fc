//! Result records for IAM entities.

use querymock_codec::{Record, Value};

use crate::registry::{Group, User};

pub(super) fn user_record(user: &User, account_id: &str) -> Record {
    Record::new()
        .with("Path", user.path.as_str())
        .with("UserName", user.name.as_str())
        .with("UserId", user.id.as_str())
        .with("Arn", user.arn(account_id))
        .with("CreateDate", user.created_at)
}

pub(super) fn group_record(group: &Group, account_id: &str) -> Record {
    Record::new()
        .with("Path", group.path.as_str())
        .with("GroupName", group.name.as_str())
        .with("GroupId", group.id.as_str())
        .with("Arn", group.arn(account_id))
        .with("CreateDate", group.created_at)
}

pub(super) fn user_list<'a>(users: impl IntoIterator<Item = &'a User>, account_id: &str) -> Value {
    Value::Sequence(
        users
            .into_iter()
            .map(|user| Value::Record(user_record(user, account_id)))
            .collect(),
    )
}

pub(super) fn group_list<'a>(groups: impl IntoIterator<Item = &'a Group>, account_id: &str) -> Value {
    Value::Sequence(
        groups
            .into_iter()
            .map(|group| Value::Record(group_record(group, account_id)))
            .collect(),
    )
}
