#[cfg(test)]
mod tests {
    use crate::domain::dashboard::requests::{
        RequestStats, RequestStatus, RequestTabs, ServiceRequest, TabKey,
    };
    use crate::domain::foundation::Timestamp;
    use serde_json::json;

    fn request(id: &str, status: &str) -> ServiceRequest {
        ServiceRequest {
            id: id.to_string(),
            customer_name: "Sam".to_string(),
            service_type: "Oil change".to_string(),
            status: RequestStatus::from(status.to_string()),
            created_at: Timestamp::now(),
        }
    }

    fn sample() -> Vec<ServiceRequest> {
        vec![
            request("r1", "pending"),
            request("r2", "approved"),
            request("r3", "pending"),
            request("r4", "completed"),
            request("r5", "rejected"),
        ]
    }

    fn ids(tabs: &RequestTabs, key: TabKey) -> Vec<String> {
        tabs.tab(key)
            .unwrap()
            .data
            .iter()
            .map(|r| r.id.clone())
            .collect()
    }

    #[test]
    fn test_tabs_are_in_display_order() {
        let tabs = RequestTabs::from_requests(&sample());
        let keys: Vec<TabKey> = tabs.iter().map(|t| t.value).collect();
        assert_eq!(
            keys,
            vec![TabKey::Pending, TabKey::Approved, TabKey::Completed, TabKey::All]
        );
    }

    #[test]
    fn test_tabs_filter_by_status_preserving_order() {
        let tabs = RequestTabs::from_requests(&sample());

        assert_eq!(ids(&tabs, TabKey::Pending), vec!["r1", "r3"]);
        assert_eq!(ids(&tabs, TabKey::Approved), vec!["r2"]);
        assert_eq!(ids(&tabs, TabKey::Completed), vec!["r4"]);
    }

    #[test]
    fn test_all_tab_includes_other_statuses() {
        let tabs = RequestTabs::from_requests(&sample());
        assert_eq!(ids(&tabs, TabKey::All), vec!["r1", "r2", "r3", "r4", "r5"]);
    }

    #[test]
    fn test_empty_collection_uses_empty_messages() {
        let tabs = RequestTabs::from_requests(&[]);

        let pending = tabs.tab(TabKey::Pending).unwrap();
        assert!(pending.is_empty());
        assert_eq!(
            pending.empty_message,
            "No pending requests. All requests have been processed."
        );
        assert_eq!(
            tabs.tab(TabKey::All).unwrap().empty_message,
            "No service requests in the system."
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(TabKey::Pending.label(), "Pending");
        assert_eq!(TabKey::All.label(), "All Requests");
    }

    #[test]
    fn test_stats_count_each_status() {
        let stats = RequestStats::from_requests(&sample());

        assert_eq!(stats.total, 5);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.completed, 1);
    }

    #[test]
    fn test_unknown_status_round_trips_verbatim() {
        let status = RequestStatus::from("in_progress".to_string());
        assert_eq!(status.as_str(), "in_progress");
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("in_progress"));
    }

    #[test]
    fn test_tab_serializes_camel_case() {
        let tabs = RequestTabs::from_requests(&[request("r1", "approved")]);
        let value = serde_json::to_value(&tabs).unwrap();

        assert_eq!(value[1]["value"], json!("approved"));
        assert_eq!(value[1]["emptyMessage"], json!("No requests are currently approved."));
        assert_eq!(value[1]["data"][0]["customerName"], json!("Sam"));
    }
}
