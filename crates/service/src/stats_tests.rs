use super::*;

#[test]
fn record_updates_count_min_max_average() {
    let mut stats = EndpointStats::new("default", "math.add");
    stats.record(10, None, 1_000);
    stats.record(30, None, 1_001);
    stats.record(20, None, 1_002);

    assert_eq!(stats.num_requests, 3);
    assert_eq!(stats.processing_time_ns, 60);
    assert_eq!(stats.min_processing_time_ns, Some(10));
    assert_eq!(stats.max_processing_time_ns, Some(30));
    assert_eq!(stats.average_processing_time_ns(), 20);
    assert_eq!(stats.num_errors, 0);
}

#[test]
fn record_with_respond_error_increments_errors_and_captures_last_error() {
    let mut stats = EndpointStats::new("default", "math.add");
    stats.record(10, Some("400:bad".to_string()), 1_000);

    assert_eq!(stats.num_errors, 1);
    assert_eq!(stats.last_error, "400:bad");
    assert_eq!(stats.num_requests, 1);
}

#[test]
fn reset_clears_everything_but_name_and_subject() {
    let mut stats = EndpointStats::new("default", "math.add");
    stats.record(10, Some("400:bad".to_string()), 1_000);

    stats.reset();

    assert_eq!(stats.name, "default");
    assert_eq!(stats.subject, "math.add");
    assert_eq!(stats.num_requests, 0);
    assert_eq!(stats.num_errors, 0);
    assert_eq!(stats.processing_time_ns, 0);
    assert!(stats.last_error.is_empty());
    assert_eq!(stats.min_processing_time_ns, None);
    assert_eq!(stats.max_processing_time_ns, None);
}

#[test]
fn average_with_no_requests_is_zero() {
    let stats = EndpointStats::new("default", "math.add");
    assert_eq!(stats.average_processing_time_ns(), 0);
}
