//! Endpoint bindings for each OpenCRM module.
//!
//! Every module exposes the same four endpoints (list, count, get, edit)
//! under module-specific names. The table here is the only place those
//! names live; [`Resource`](crate::resource::Resource) consumes it.

/// Static endpoint binding for one OpenCRM module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module {
    /// Display name, e.g. `Leads`.
    pub name: &'static str,
    /// Endpoint returning a page of records.
    pub list_endpoint: &'static str,
    /// Endpoint returning the number of matching records.
    pub count_endpoint: &'static str,
    /// Endpoint returning one record by id.
    pub get_endpoint: &'static str,
    /// Endpoint creating (id 0) or updating a record.
    pub edit_endpoint: &'static str,
}

impl Module {
    /// Leads.
    pub const LEADS: Module = Module {
        name: "Leads",
        list_endpoint: "get_lead_list",
        count_endpoint: "get_lead_list_count",
        get_endpoint: "get_lead",
        edit_endpoint: "edit_lead",
    };

    /// Contacts.
    pub const CONTACTS: Module = Module {
        name: "Contacts",
        list_endpoint: "get_contact_list",
        count_endpoint: "get_contact_list_count",
        get_endpoint: "get_contact",
        edit_endpoint: "edit_contact",
    };

    /// Companies.
    pub const COMPANIES: Module = Module {
        name: "Companies",
        list_endpoint: "get_company_list",
        count_endpoint: "get_company_list_count",
        get_endpoint: "get_company",
        edit_endpoint: "edit_company",
    };

    /// Projects.
    pub const PROJECTS: Module = Module {
        name: "Projects",
        list_endpoint: "get_project_list",
        count_endpoint: "get_project_list_count",
        get_endpoint: "get_project",
        edit_endpoint: "edit_project",
    };

    /// Helpdesk tickets.
    pub const HELPDESK: Module = Module {
        name: "Helpdesk",
        list_endpoint: "get_ticket_list",
        count_endpoint: "get_ticket_list_count",
        get_endpoint: "get_ticket",
        edit_endpoint: "edit_ticket",
    };

    /// Opportunities.
    pub const OPPORTUNITIES: Module = Module {
        name: "Opportunities",
        list_endpoint: "get_opportunity_list",
        count_endpoint: "get_opportunity_list_count",
        get_endpoint: "get_opportunity",
        edit_endpoint: "edit_opportunity",
    };

    /// Products.
    pub const PRODUCTS: Module = Module {
        name: "Products",
        list_endpoint: "get_product_list",
        count_endpoint: "get_product_list_count",
        get_endpoint: "get_product",
        edit_endpoint: "edit_product",
    };

    /// Activities.
    pub const ACTIVITIES: Module = Module {
        name: "Activities",
        list_endpoint: "get_activity_list",
        count_endpoint: "get_activity_list_count",
        get_endpoint: "get_activity",
        edit_endpoint: "edit_activity",
    };

    /// Every supported module.
    pub const ALL: [&'static Module; 8] = [
        &Module::LEADS,
        &Module::CONTACTS,
        &Module::COMPANIES,
        &Module::PROJECTS,
        &Module::HELPDESK,
        &Module::OPPORTUNITIES,
        &Module::PRODUCTS,
        &Module::ACTIVITIES,
    ];

    /// Looks a module up by name, ignoring case. `tickets` resolves to helpdesk.
    pub fn by_name(name: &str) -> Option<&'static Module> {
        if name.eq_ignore_ascii_case("tickets") {
            return Some(&Module::HELPDESK);
        }
        Module::ALL
            .into_iter()
            .find(|module| module.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        assert_eq!(Module::by_name("leads"), Some(&Module::LEADS));
        assert_eq!(Module::by_name("Opportunities"), Some(&Module::OPPORTUNITIES));
        assert_eq!(Module::by_name("tickets"), Some(&Module::HELPDESK));
        assert_eq!(Module::by_name("invoices"), None);
    }

    #[test]
    fn test_endpoint_names_follow_module_pattern() {
        for module in Module::ALL {
            assert_eq!(module.count_endpoint, format!("{}_count", module.list_endpoint));
            assert!(module.list_endpoint.starts_with("get_"));
            assert!(module.edit_endpoint.starts_with("edit_"));
            assert_eq!(
                module.get_endpoint.trim_start_matches("get_"),
                module.edit_endpoint.trim_start_matches("edit_")
            );
        }
    }

    #[test]
    fn test_lead_endpoints() {
        let leads = Module::LEADS;
        assert_eq!(leads.list_endpoint, "get_lead_list");
        assert_eq!(leads.count_endpoint, "get_lead_list_count");
        assert_eq!(leads.get_endpoint, "get_lead");
        assert_eq!(leads.edit_endpoint, "edit_lead");
    }
}
