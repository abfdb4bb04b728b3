mod common;

use {
    common::{Call, FakeDisplays},
    mccs_script::{Error, IndexPolicy, MonitorContext, MonitorIndex, PhysicalMonitors, Retention},
};

fn indices(displays: &FakeDisplays, policy: IndexPolicy) -> Vec<(usize, String)> {
    let outputs = mccs_script::enumerate(displays).unwrap();
    PhysicalMonitors::new(displays, &outputs, policy)
        .map(|monitor| {
            let monitor = monitor.unwrap();
            (monitor.index().0, monitor.description().to_owned())
        })
        .collect()
}

#[test]
fn index_advances_per_logical_display() {
    let displays = FakeDisplays::new(&[&["BenQ GL2450H"], &["Dell U2417H", "Dell U2417H"], &[], &["LG 27UK850"]]);
    assert_eq!(indices(&displays, IndexPolicy::PerOutput), vec![
        (0, "BenQ GL2450H".into()),
        (1, "Dell U2417H".into()),
        (1, "Dell U2417H".into()),
        (3, "LG 27UK850".into()),
    ]);
}

#[test]
fn index_advances_per_physical_monitor() {
    let displays = FakeDisplays::new(&[&["BenQ GL2450H"], &["Dell U2417H", "Dell U2417H"], &[], &["LG 27UK850"]]);
    let walked: Vec<usize> = indices(&displays, IndexPolicy::PerMonitor)
        .into_iter()
        .map(|(index, _)| index)
        .collect();
    assert_eq!(walked, vec![0, 1, 2, 3]);
}

#[test]
fn walk_yields_every_physical_monitor() {
    let displays = FakeDisplays::new(&[&["a", "b", "c"], &[], &["d"], &["e", "f"]]);
    assert_eq!(indices(&displays, IndexPolicy::PerOutput).len(), 6);
    assert_eq!(displays.releases(), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn handles_are_released_in_yield_order_before_the_next() {
    let displays = FakeDisplays::new(&[&["a", "b"], &["c"]]);
    let outputs = mccs_script::enumerate(&displays).unwrap();
    displays.clear_calls();

    for monitor in PhysicalMonitors::new(&displays, &outputs, IndexPolicy::PerOutput) {
        let monitor = monitor.unwrap();
        assert!(!displays.releases().contains(&monitor.handle().0));
    }

    assert_eq!(displays.calls(), vec![
        Call::Count(0),
        Call::Fetch(0, 2),
        Call::Release(0),
        Call::Release(1),
        Call::Count(1),
        Call::Fetch(1, 1),
        Call::Release(2),
    ]);
}

#[test]
fn retained_handles_are_not_released_until_returned() {
    let displays = FakeDisplays::new(&[&["a", "b"], &["c"]]);
    let outputs = mccs_script::enumerate(&displays).unwrap();

    let raw: Vec<_> = PhysicalMonitors::new(&displays, &outputs, IndexPolicy::PerOutput)
        .map(|monitor| monitor.unwrap().into_raw())
        .collect();
    assert_eq!(raw.len(), 3);
    assert!(displays.releases().is_empty());

    for raw in raw {
        mccs_script::Monitor::from_raw(&displays, raw).release().unwrap();
    }
    assert_eq!(displays.releases(), vec![0, 1, 2]);
}

#[test]
fn abandoned_walk_releases_unvisited_handles() {
    let displays = FakeDisplays::new(&[&["a", "b", "c"], &["d"]]);
    let outputs = mccs_script::enumerate(&displays).unwrap();

    let first = PhysicalMonitors::new(&displays, &outputs, IndexPolicy::PerOutput)
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(displays.releases(), vec![1, 2]);
    drop(first);
    assert_eq!(displays.releases(), vec![1, 2, 0]);
    assert!(!displays.calls().contains(&Call::Count(1)));
}

#[test]
fn enumeration_failure_stops_before_any_query() {
    let displays = FakeDisplays::failing_enumeration();
    let err = MonitorContext::new(&displays, IndexPolicy::default()).err().unwrap();
    assert!(matches!(err, Error::Enumeration(..)));
    assert!(err.is_fatal());
    assert_eq!(displays.calls(), vec![Call::Enumerate]);
    assert_eq!(displays.queries(), 0);
}

#[test]
fn query_failure_ends_the_walk() {
    let displays = FakeDisplays::new(&[&["a"], &["b"], &["c"]]).fail_query(1);
    let outputs = mccs_script::enumerate(&displays).unwrap();

    let mut walk = PhysicalMonitors::new(&displays, &outputs, IndexPolicy::PerOutput);
    assert_eq!(walk.next().unwrap().unwrap().index(), MonitorIndex(0));
    let err = walk.next().unwrap().unwrap_err();
    assert!(matches!(err, Error::Query { .. }));
    assert!(err.is_fatal());
    assert!(walk.next().is_none());
    drop(walk);
    assert!(!displays.calls().contains(&Call::Count(2)));
}

#[test]
fn listing_with_release_frees_every_handle() {
    let displays = FakeDisplays::new(&[&["a"], &["b", "c"]]);
    let mut context = MonitorContext::new(&displays, IndexPolicy::PerMonitor).unwrap();

    let listing = context.list(Retention::Release).unwrap();
    assert_eq!(listing.len(), 3);
    assert_eq!(listing[2].index, MonitorIndex(2));
    assert_eq!(listing[2].description, "c");
    assert_eq!(displays.releases(), vec![0, 1, 2]);
    assert!(context.retained().is_empty());
}

#[test]
fn retained_listing_is_released_on_close() {
    let displays = FakeDisplays::new(&[&["a"], &["b", "c"]]);
    let mut context = MonitorContext::new(&displays, IndexPolicy::PerOutput).unwrap();

    let listing = context.list(Retention::Retain).unwrap();
    assert_eq!(listing.len(), 3);
    assert_eq!(context.retained().len(), 3);
    assert!(displays.releases().is_empty());

    context.close().unwrap();
    assert_eq!(displays.releases(), vec![0, 1, 2]);
}

#[test]
fn retained_listing_is_released_on_drop() {
    let displays = FakeDisplays::new(&[&["a", "b"]]);
    {
        let mut context = MonitorContext::new(&displays, IndexPolicy::PerOutput).unwrap();
        context.list(Retention::Retain).unwrap();
        assert!(displays.releases().is_empty());
    }
    assert_eq!(displays.releases(), vec![0, 1]);
}

#[test]
fn context_enumerates_once() {
    let displays = FakeDisplays::new(&[&["a"], &["b"]]);
    let mut context = MonitorContext::new(&displays, IndexPolicy::PerOutput).unwrap();
    context.list(Retention::Release).unwrap();
    context.resolve(MonitorIndex(1)).unwrap().unwrap();
    let enumerations = displays.calls().iter().filter(|call| **call == Call::Enumerate).count();
    assert_eq!(enumerations, 1);
    assert_eq!(context.outputs(), &[0, 1]);
}

#[test]
fn fetch_failure_ends_the_walk() {
    let displays = FakeDisplays::new(&[&["a"], &["b"], &["c"]]).fail_fetch(1);
    let outputs = mccs_script::enumerate(&displays).unwrap();

    let walked: Vec<_> = PhysicalMonitors::new(&displays, &outputs, IndexPolicy::PerOutput).collect();
    assert_eq!(walked.len(), 2);
    assert!(walked[0].is_ok());
    assert!(matches!(walked[1], Err(Error::Query { .. })));
    drop(walked);

    assert!(displays.calls().contains(&Call::Fetch(1, 1)));
    assert!(!displays.calls().contains(&Call::Count(2)));
}

#[test]
fn failed_release_is_reported() {
    let displays = FakeDisplays::new(&[&["BenQ GL2450H"]]).fail_release(0);
    let outputs = mccs_script::enumerate(&displays).unwrap();

    let monitor = PhysicalMonitors::new(&displays, &outputs, IndexPolicy::PerOutput)
        .next()
        .unwrap()
        .unwrap();
    match monitor.release().unwrap_err() {
        Error::Release { index, description, .. } => {
            assert_eq!(index, MonitorIndex(0));
            assert_eq!(description, "BenQ GL2450H");
        },
        e => panic!("unexpected error {e:?}"),
    }
    assert_eq!(displays.releases(), vec![0]);
}

#[test]
fn close_releases_every_handle_and_returns_the_failure() {
    let displays = FakeDisplays::new(&[&["a"], &["b"], &["c"]]).fail_release(1);
    let mut context = MonitorContext::new(&displays, IndexPolicy::PerMonitor).unwrap();
    context.list(Retention::Retain).unwrap();

    let err = context.close().unwrap_err();
    assert!(matches!(err, Error::Release { index: MonitorIndex(1), .. }));
    assert!(!err.is_fatal());
    assert_eq!(displays.releases(), vec![0, 1, 2]);
}
