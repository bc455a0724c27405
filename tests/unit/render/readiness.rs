use super::*;

#[tokio::test]
async fn resolves_once_signalled() {
    let (signal, ready) = readiness::<u32>(Awaited::Library);
    let waiter = ready.clone();
    let handle = tokio::spawn(async move { waiter.wait(Duration::from_secs(5)).await });
    tokio::time::sleep(Duration::from_millis(10)).await;
    signal.ready(7);
    assert_eq!(handle.await.unwrap().unwrap(), 7);
    // late waiters see the value immediately
    assert_eq!(ready.wait(Duration::from_millis(1)).await.unwrap(), 7);
}

#[tokio::test]
async fn library_timeout_is_library_unavailable() {
    let (_signal, ready) = readiness::<()>(Awaited::Library);
    let err = ready.wait(Duration::from_millis(20)).await.unwrap_err();
    match err {
        FigError::LibraryUnavailable { waited_ms } => assert!(waited_ms >= 19),
        other => panic!("unexpected {other}"),
    }
}

#[tokio::test]
async fn target_timeout_names_the_target() {
    let (_signal, ready) = readiness::<()>(Awaited::Target("plotlyFigure7".into()));
    let err = ready.wait(Duration::from_millis(20)).await.unwrap_err();
    assert!(matches!(
        err,
        FigError::TargetNotFound { ref target, .. } if target == "plotlyFigure7"
    ));
}

#[tokio::test]
async fn dropped_signal_fails_without_waiting_out_the_timeout() {
    let (signal, ready) = readiness::<()>(Awaited::Library);
    drop(signal);
    let started = std::time::Instant::now();
    let err = ready.wait(Duration::from_secs(10)).await.unwrap_err();
    assert!(matches!(err, FigError::LibraryUnavailable { .. }));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn ready_now_needs_no_signal() {
    let ready = Readiness::ready_now(Awaited::Target("t".into()), "div");
    assert_eq!(ready.wait(Duration::ZERO).await.unwrap(), "div");
    assert_eq!(ready.awaited(), &Awaited::Target("t".into()));
}
