//! Read-only IAM operations over an [`IdentityRegistry`].
//!
//! The API set registers `GetUser`, `GetGroup`, `ListUsers`, and
//! `ListGroups`. Every parameter is optional in the schemas; the handlers
//! raise `MissingParameter` themselves so absent names surface as that fault
//! rather than as a decoding failure.

mod records;

use std::sync::Arc;

use querymock_codec::{Field, ProtocolVariant, Record, Schema, Value};

use crate::apiset::{ApiSet, QueryOperation};
use crate::dispatch::{Service, ServiceError};
use crate::fault::SenderFault;
use crate::registry::IdentityRegistry;

use self::records::{group_list, group_record, user_list, user_record};

/// API version of the IAM Query protocol.
pub const IAM_VERSION: &str = "2010-05-08";

/// Namespace of IAM success responses.
pub const IAM_NAMESPACE: &str = "https://iam.amazonaws.com/doc/2010-05-08/";

/// Service name reported to IAM operations.
pub const IAM_SERVICE_NAME: &str = "iam";

const DEFAULT_PATH_PREFIX: &str = "/";

/// Builds the IAM operations for `version`, answering in `namespace`.
#[must_use]
pub fn api_set(
    version: &str,
    namespace: &str,
    registry: Arc<dyn IdentityRegistry>,
    account_id: &str,
) -> ApiSet {
    let mut set = ApiSet::new(version, namespace);
    set.register(get_user(Arc::clone(&registry), account_id.to_owned()));
    set.register(get_group(Arc::clone(&registry), account_id.to_owned()));
    set.register(list_users(Arc::clone(&registry), account_id.to_owned()));
    set.register(list_groups(registry, account_id.to_owned()));
    set
}

/// Builds the `iam` service with one API set at [`IAM_VERSION`].
#[must_use]
pub fn service(registry: Arc<dyn IdentityRegistry>, account_id: &str) -> Service {
    let mut service = Service::new(IAM_SERVICE_NAME);
    service.add_api_set(api_set(IAM_VERSION, IAM_NAMESPACE, registry, account_id));
    service
}

fn listing_schema() -> Schema {
    Schema::record([
        Field::new("PathPrefix", Schema::string()),
        Field::new("Marker", Schema::string()),
        Field::new("MaxItems", Schema::int32()),
    ])
}

fn get_user(registry: Arc<dyn IdentityRegistry>, account_id: String) -> QueryOperation {
    let schema = Schema::record([Field::new("UserName", Schema::string())]);
    QueryOperation::new("GetUser", schema, ProtocolVariant::Query, move |_, params| {
        let name = required_name(&params, "UserName")?;
        let user = registry.user_by_name(name)?.ok_or_else(|| {
            SenderFault::no_such_entity(format!("The user with name {name} cannot be found."))
        })?;
        Ok(Value::Record(
            Record::new().with("User", user_record(&user, &account_id)),
        ))
    })
}

fn get_group(registry: Arc<dyn IdentityRegistry>, account_id: String) -> QueryOperation {
    let schema = Schema::record([
        Field::new("GroupName", Schema::string()),
        Field::new("Marker", Schema::string()),
        Field::new("MaxItems", Schema::int32()),
    ]);
    QueryOperation::new("GetGroup", schema, ProtocolVariant::Query, move |_, params| {
        let name = required_name(&params, "GroupName")?;
        let group = registry.group_by_name(name)?.ok_or_else(|| {
            SenderFault::no_such_entity(format!("The group with name {name} cannot be found."))
        })?;
        Ok(Value::Record(
            Record::new()
                .with("Group", group_record(&group, &account_id))
                .with("Users", user_list(&group.members, &account_id))
                .with("IsTruncated", false),
        ))
    })
}

fn list_users(registry: Arc<dyn IdentityRegistry>, account_id: String) -> QueryOperation {
    QueryOperation::new("ListUsers", listing_schema(), ProtocolVariant::Query, move |_, params| {
        let prefix = path_prefix(&params);
        let users = registry.users()?;
        let matching = users.iter().filter(|user| user.path.starts_with(prefix));
        Ok(Value::Record(
            Record::new()
                .with("Users", user_list(matching, &account_id))
                .with("IsTruncated", false),
        ))
    })
}

fn list_groups(registry: Arc<dyn IdentityRegistry>, account_id: String) -> QueryOperation {
    QueryOperation::new("ListGroups", listing_schema(), ProtocolVariant::Query, move |_, params| {
        let prefix = path_prefix(&params);
        let groups = registry.groups()?;
        let matching = groups.iter().filter(|group| group.path.starts_with(prefix));
        Ok(Value::Record(
            Record::new()
                .with("Groups", group_list(matching, &account_id))
                .with("IsTruncated", false),
        ))
    })
}

fn required_name<'a>(params: &'a Value, parameter: &str) -> Result<&'a str, ServiceError> {
    params
        .as_record()
        .and_then(|record| record.get_str(parameter))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| SenderFault::missing_parameter(parameter).into())
}

fn path_prefix(params: &Value) -> &str {
    params
        .as_record()
        .and_then(|record| record.get_str("PathPrefix"))
        .filter(|prefix| !prefix.is_empty())
        .unwrap_or(DEFAULT_PATH_PREFIX)
}
