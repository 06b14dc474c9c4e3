//! Static description of the exposed tools, resource and prompt.

use serde::Serialize;

pub const DELIVERED_RESOURCE_URI: &str = "packages://delivered";

/// How a host should register an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Callable action with arguments.
    Tool,
    /// Read-only document addressed by URI.
    Resource,
    /// Prompt text for a conversational agent.
    Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolArgument {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub kind: ToolKind,
    /// Tool/prompt name, or URI for resources.
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: &'static [ToolArgument],
}

const ADD_PACKAGE_ARGS: &[ToolArgument] = &[
    ToolArgument {
        name: "name",
        required: true,
        description: "Display name of the package.",
    },
    ToolArgument {
        name: "courier",
        required: true,
        description: "Carrier handling the shipment.",
    },
    ToolArgument {
        name: "tracking_number",
        required: true,
        description: "Carrier tracking number, used for later updates.",
    },
    ToolArgument {
        name: "eta",
        required: false,
        description: "Expected delivery date, YYYY-MM-DD.",
    },
];

const UPDATE_STATUS_ARGS: &[ToolArgument] = &[
    ToolArgument {
        name: "tracking_number",
        required: true,
        description: "Tracking number of the package to update.",
    },
    ToolArgument {
        name: "new_status",
        required: true,
        description: "New delivery status, e.g. In transit or Delivered.",
    },
];

const CATALOG: &[ToolDescriptor] = &[
    ToolDescriptor {
        kind: ToolKind::Tool,
        name: "add_package",
        description: "Add a package to track. Optional ETA format: YYYY-MM-DD",
        arguments: ADD_PACKAGE_ARGS,
    },
    ToolDescriptor {
        kind: ToolKind::Tool,
        name: "update_status",
        description: "Update the delivery status of a package.",
        arguments: UPDATE_STATUS_ARGS,
    },
    ToolDescriptor {
        kind: ToolKind::Tool,
        name: "list_all_packages",
        description: "List all packages with their current status.",
        arguments: &[],
    },
    ToolDescriptor {
        kind: ToolKind::Tool,
        name: "check_overdue_packages",
        description: "Check for packages that are overdue based on ETA.",
        arguments: &[],
    },
    ToolDescriptor {
        kind: ToolKind::Resource,
        name: DELIVERED_RESOURCE_URI,
        description: "Show all delivered packages.",
        arguments: &[],
    },
    ToolDescriptor {
        kind: ToolKind::Prompt,
        name: "delivery_summary_prompt",
        description:
            "Generate a summary of all packages and ask if any are delayed or need follow-up.",
        arguments: &[],
    },
];

/// Returns every entry a host should register, in registration order.
pub fn catalog() -> &'static [ToolDescriptor] {
    CATALOG
}

#[cfg(test)]
mod tests {
    use super::{catalog, ToolKind, DELIVERED_RESOURCE_URI};

    #[test]
    fn catalog_names_are_unique() {
        let mut names = catalog().iter().map(|entry| entry.name).collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), catalog().len());
    }

    #[test]
    fn delivered_listing_is_a_resource() {
        let entry = catalog()
            .iter()
            .find(|entry| entry.name == DELIVERED_RESOURCE_URI)
            .expect("delivered resource registered");
        assert_eq!(entry.kind, ToolKind::Resource);
    }

    #[test]
    fn serializes_kind_in_snake_case() {
        let json = serde_json::to_value(catalog()[0]).unwrap();
        assert_eq!(json["kind"], "tool");
        assert_eq!(json["arguments"][3]["required"], false);
    }
}
