//! HostStore trait test suite

use hosts_directory_storage::{
    CallerId, HostFilter, HostId, HostPatch, NewHost, Storage, StorageError,
};

/// Run all HostStore tests
pub async fn run_all<S: Storage>(storage: &S) {
    test_create_defaults_group_and_remark(storage).await;
    test_create_assigns_unique_ids(storage).await;
    test_create_rejects_missing_fields(storage).await;
    test_create_rejects_too_long_fields(storage).await;
    test_create_duplicate_rejected(storage).await;
    test_same_pair_in_other_group_allowed(storage).await;
    test_list_filters_by_group(storage).await;
    test_list_empty_group_set(storage).await;
    test_list_is_ordered_by_id(storage).await;
    test_get_by_id(storage).await;
    test_get_by_id_not_found(storage).await;
    test_update_partial(storage).await;
    test_update_with_empty_patch_touches_only_audit(storage).await;
    test_update_not_found(storage).await;
    test_update_into_duplicate_rejected(storage).await;
    test_delete(storage).await;
    test_delete_not_found(storage).await;
    test_unicode_round_trip(storage).await;
}

async fn create<S: Storage>(storage: &S, ip: &str, domain: &str, group: &str) -> HostId {
    storage
        .create(NewHost::new(ip, domain).with_group(group))
        .await
        .expect("create should succeed")
        .id
}

async fn list_group<S: Storage>(storage: &S, group: &str) -> Vec<(String, String)> {
    storage
        .list(&HostFilter::groups([group]))
        .await
        .expect("list should succeed")
        .into_iter()
        .map(|r| (r.ip_addr, r.domain))
        .collect()
}

pub async fn test_create_defaults_group_and_remark<S: Storage>(storage: &S) {
    let record = storage
        .create(NewHost::new("10.1.0.1", "defaults.local").created_by(CallerId::new(7)))
        .await
        .expect("create should succeed");

    assert_eq!(record.hosts_group, "default_group");
    assert_eq!(record.remark, "");
    assert_eq!(record.created_by, CallerId::new(7));
    assert_eq!(record.updated_by, CallerId::new(7));
    assert_eq!(record.created_time, record.updated_time);

    let stored = storage.get_by_id(record.id).await.expect("get should succeed");
    assert_eq!(stored, record);

    storage.delete(record.id).await.expect("cleanup");
}

pub async fn test_create_assigns_unique_ids<S: Storage>(storage: &S) {
    let a = create(storage, "10.2.0.1", "a.local", "ids").await;
    let b = create(storage, "10.2.0.2", "b.local", "ids").await;
    let c = create(storage, "10.2.0.3", "c.local", "ids").await;

    assert_ne!(a, b);
    assert_ne!(b, c);
    assert!(a < b && b < c, "ids should increase: {a} {b} {c}");
}

pub async fn test_create_rejects_missing_fields<S: Storage>(storage: &S) {
    let err = storage
        .create(NewHost::new("", "missing-ip.local").with_group("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)), "got {err:?}");

    let err = storage
        .create(NewHost::new("10.3.0.1", "").with_group("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)), "got {err:?}");

    assert!(list_group(storage, "missing").await.is_empty());
}

pub async fn test_create_rejects_too_long_fields<S: Storage>(storage: &S) {
    let long_domain = "d".repeat(101);
    let err = storage
        .create(NewHost::new("10.4.0.1", long_domain).with_group("long"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)), "got {err:?}");

    // exactly at the limit is fine
    let at_limit = "d".repeat(100);
    create(storage, "10.4.0.1", &at_limit, "long").await;
}

pub async fn test_create_duplicate_rejected<S: Storage>(storage: &S) {
    create(storage, "10.5.0.1", "dup.local", "dup").await;

    let err = storage
        .create(NewHost::new("10.5.0.1", "dup.local").with_group("dup"))
        .await
        .unwrap_err();
    match err {
        StorageError::DuplicateEntry {
            ip_addr,
            domain,
            hosts_group,
        } => {
            assert_eq!(ip_addr, "10.5.0.1");
            assert_eq!(domain, "dup.local");
            assert_eq!(hosts_group, "dup");
        }
        other => panic!("expected DuplicateEntry, got {other:?}"),
    }

    assert_eq!(list_group(storage, "dup").await.len(), 1);
}

pub async fn test_same_pair_in_other_group_allowed<S: Storage>(storage: &S) {
    create(storage, "10.6.0.1", "shared.local", "pair-a").await;
    create(storage, "10.6.0.1", "shared.local", "pair-b").await;

    let both = storage
        .list(&HostFilter::groups(["pair-a", "pair-b"]))
        .await
        .expect("list should succeed");
    assert_eq!(both.len(), 2);
}

pub async fn test_list_filters_by_group<S: Storage>(storage: &S) {
    create(storage, "10.7.0.1", "web.local", "filter-a").await;
    create(storage, "10.7.0.2", "db.local", "filter-b").await;
    create(storage, "10.7.0.3", "cache.local", "filter-c").await;

    let records = storage
        .list(&HostFilter::groups(["filter-a", "filter-c"]))
        .await
        .expect("list should succeed");
    let groups: Vec<&str> = records.iter().map(|r| r.hosts_group.as_str()).collect();
    assert_eq!(groups, vec!["filter-a", "filter-c"]);

    let all = storage
        .list(&HostFilter::all())
        .await
        .expect("list should succeed");
    for group in ["filter-a", "filter-b", "filter-c"] {
        assert!(all.iter().any(|r| r.hosts_group == group));
    }
}

pub async fn test_list_empty_group_set<S: Storage>(storage: &S) {
    create(storage, "10.8.0.1", "empty-set.local", "empty-set").await;

    let filter = HostFilter {
        groups: Some(Vec::new()),
    };
    let records = storage.list(&filter).await.expect("list should succeed");
    assert!(records.is_empty());

    // a group nobody uses matches nothing
    assert!(list_group(storage, "no-such-group").await.is_empty());
}

pub async fn test_list_is_ordered_by_id<S: Storage>(storage: &S) {
    create(storage, "10.9.0.3", "z.local", "order").await;
    create(storage, "10.9.0.1", "a.local", "order").await;
    create(storage, "10.9.0.2", "m.local", "order").await;

    let domains: Vec<String> = list_group(storage, "order")
        .await
        .into_iter()
        .map(|(_, d)| d)
        .collect();
    assert_eq!(domains, vec!["z.local", "a.local", "m.local"]);
}

pub async fn test_get_by_id<S: Storage>(storage: &S) {
    let created = storage
        .create(
            NewHost::new("10.10.0.1", "get.local")
                .with_group("get")
                .with_remark("primary"),
        )
        .await
        .expect("create should succeed");

    let fetched = storage
        .get_by_id(created.id)
        .await
        .expect("get should succeed");
    assert_eq!(fetched, created);
    assert_eq!(fetched.remark, "primary");
}

pub async fn test_get_by_id_not_found<S: Storage>(storage: &S) {
    let err = storage
        .get_by_id(HostId::new(i64::from(u32::MAX)))
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

pub async fn test_update_partial<S: Storage>(storage: &S) {
    let created = storage
        .create(
            NewHost::new("10.11.0.1", "before.local")
                .with_group("update")
                .with_remark("keep me"),
        )
        .await
        .expect("create should succeed");

    let patch = HostPatch {
        domain: Some("after.local".into()),
        remark: Some(String::new()),
        updated_by: CallerId::new(42),
        ..Default::default()
    };
    let updated = storage
        .update(created.id, patch)
        .await
        .expect("update should succeed");

    assert_eq!(updated.domain, "after.local");
    assert_eq!(updated.ip_addr, "10.11.0.1");
    assert_eq!(updated.hosts_group, "update");
    assert_eq!(updated.remark, "keep me", "empty value must not clear");
    assert_eq!(updated.created_by, created.created_by);
    assert_eq!(updated.created_time, created.created_time);
    assert_eq!(updated.updated_by, CallerId::new(42));
    assert!(updated.updated_time >= created.updated_time);

    let stored = storage.get_by_id(created.id).await.expect("get");
    assert_eq!(stored, updated);
}

pub async fn test_update_with_empty_patch_touches_only_audit<S: Storage>(storage: &S) {
    let created = storage
        .create(NewHost::new("10.12.0.1", "touch.local").with_group("touch"))
        .await
        .expect("create should succeed");

    let patch = HostPatch {
        updated_by: CallerId::new(3),
        ..Default::default()
    };
    let updated = storage.update(created.id, patch).await.expect("update");

    assert_eq!(updated.ip_addr, created.ip_addr);
    assert_eq!(updated.domain, created.domain);
    assert_eq!(updated.hosts_group, created.hosts_group);
    assert_eq!(updated.remark, created.remark);
    assert_eq!(updated.updated_by, CallerId::new(3));
}

pub async fn test_update_not_found<S: Storage>(storage: &S) {
    let patch = HostPatch {
        domain: Some("ghost.local".into()),
        ..Default::default()
    };
    let err = storage
        .update(HostId::new(i64::from(u32::MAX)), patch)
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

pub async fn test_update_into_duplicate_rejected<S: Storage>(storage: &S) {
    create(storage, "10.13.0.1", "taken.local", "collide").await;
    let other = create(storage, "10.13.0.2", "taken.local", "collide").await;

    let patch = HostPatch {
        ip_addr: Some("10.13.0.1".into()),
        ..Default::default()
    };
    let err = storage.update(other, patch).await.unwrap_err();
    assert!(
        matches!(err, StorageError::DuplicateEntry { .. }),
        "got {err:?}"
    );

    let unchanged = storage.get_by_id(other).await.expect("get");
    assert_eq!(unchanged.ip_addr, "10.13.0.2");
}

pub async fn test_delete<S: Storage>(storage: &S) {
    let id = create(storage, "10.14.0.1", "delete.local", "delete").await;

    storage.delete(id).await.expect("delete should succeed");

    let err = storage.get_by_id(id).await.unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
    assert!(list_group(storage, "delete").await.is_empty());
}

pub async fn test_delete_not_found<S: Storage>(storage: &S) {
    let err = storage
        .delete(HostId::new(i64::from(u32::MAX)))
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

pub async fn test_unicode_round_trip<S: Storage>(storage: &S) {
    let created = storage
        .create(
            NewHost::new("10.15.0.1", "bücher.example")
                .with_group("unicode")
                .with_remark("日本語のメモ"),
        )
        .await
        .expect("create should succeed");

    let fetched = storage.get_by_id(created.id).await.expect("get");
    assert_eq!(fetched.domain, "bücher.example");
    assert_eq!(fetched.remark, "日本語のメモ");
}
