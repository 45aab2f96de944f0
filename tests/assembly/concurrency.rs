//! Concurrent callers racing on the provider cache

use crate::common::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn racing_callers_build_once() {
    init_tracing();
    let counter = Arc::new(AtomicUsize::new(0));
    let provider = Arc::new(ModuleProvider::new(counting_creation(&["user"], counter.clone())));
    let contract = Arc::new(Contract::new().with("user", Descriptor::table_name("users")));

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let provider = provider.clone();
            let contract = contract.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                provider.provide(&base("Base"), &contract, &[]).unwrap()
            })
        })
        .collect();

    let namespaces: Vec<Arc<Namespace>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    for ns in &namespaces[1..] {
        assert!(Arc::ptr_eq(ns, &namespaces[0]));
    }
}

#[test]
fn distinct_bases_from_many_threads() {
    let provider = Arc::new(ModuleProvider::new(blog_creation(AssemblyConfig::default())));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let provider = provider.clone();
            thread::spawn(move || {
                provider
                    .provide(&base(&format!("Base{}", i)), &blog_contract(), &[])
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().len(), 4);
    }
    assert_eq!(provider.len(), 4);
}
