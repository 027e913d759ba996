use std::io::Write;
use std::sync::{Arc, Mutex};

use harvest_ledger::{LedgerError, LedgerEvent};
use harvest_nullables::{NullClock, NullPositionStore, NullTransfer, TransferCall};
use harvest_service::{ServiceConfig, ServiceError, StakingService};
use harvest_types::{Clock, ParticipantId};

const YEAR: u64 = 31_536_000;

fn service_with(clock: Arc<NullClock>, transfer: Arc<NullTransfer>) -> StakingService {
    StakingService::new(&ServiceConfig::default(), transfer, clock).unwrap()
}

#[test]
fn full_staking_cycle_through_the_service() {
    let clock = Arc::new(NullClock::new(0));
    let transfer = Arc::new(NullTransfer::new());
    let service = service_with(Arc::clone(&clock), Arc::clone(&transfer));
    let alice = ParticipantId::new("alice");

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    service.subscribe(Box::new(move |event| {
        sink.lock().unwrap().push(event.clone());
    }));

    service.deposit(&alice, 1_000_000).unwrap();
    clock.advance(YEAR);

    assert_eq!(service.pending_reward(&alice).unwrap(), 100_000);

    service.withdraw(&alice, 400_000).unwrap();
    assert_eq!(service.principal(&alice), 600_000);

    let paid = service.claim_reward(&alice).unwrap();
    assert_eq!(paid, 100_000);
    assert_eq!(service.pending_reward(&alice).unwrap(), 0);

    assert_eq!(
        transfer.calls(),
        vec![
            TransferCall::In {
                from: alice.clone(),
                amount: 1_000_000
            },
            TransferCall::Out {
                to: alice.clone(),
                amount: 400_000
            },
            TransferCall::Out {
                to: alice.clone(),
                amount: 100_000
            },
        ]
    );
    assert_eq!(events.lock().unwrap().len(), 3);
}

#[test]
fn rejected_outbound_transfer_surfaces_and_rolls_back() {
    let clock = Arc::new(NullClock::new(0));
    let transfer = Arc::new(NullTransfer::new());
    let service = service_with(Arc::clone(&clock), Arc::clone(&transfer));
    let bob = ParticipantId::new("bob");

    service.deposit(&bob, 50_000).unwrap();
    clock.advance(1000);

    transfer.reject_outbound(true);
    let err = service.withdraw(&bob, 10_000).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Ledger(LedgerError::TransferFailed { .. })
    ));
    assert_eq!(service.principal(&bob), 50_000);

    transfer.reject_outbound(false);
    service.withdraw(&bob, 10_000).unwrap();
    assert_eq!(service.principal(&bob), 40_000);
}

#[test]
fn preview_is_consistent_across_operations_at_one_instant() {
    let clock = Arc::new(NullClock::new(0));
    let transfer = Arc::new(NullTransfer::new());
    let service = service_with(Arc::clone(&clock), Arc::clone(&transfer));
    let carol = ParticipantId::new("carol");

    service.deposit(&carol, 3_000_000).unwrap();
    clock.advance(YEAR / 2);

    let previewed = service.pending_reward(&carol).unwrap();
    let paid = service.claim_reward(&carol).unwrap();
    assert_eq!(paid, previewed);
}

#[test]
fn custom_rate_flows_from_config() {
    let clock = Arc::new(NullClock::new(0));
    let transfer = Arc::new(NullTransfer::new());
    let config = ServiceConfig {
        rate_bps: 2500, // 25% per year
        ..ServiceConfig::default()
    };
    let service =
        StakingService::new(&config, transfer, Arc::clone(&clock) as Arc<dyn Clock>).unwrap();
    let dave = ParticipantId::new("dave");

    service.deposit(&dave, 1_000_000).unwrap();
    clock.advance(YEAR);
    assert_eq!(service.pending_reward(&dave).unwrap(), 250_000);
}

#[test]
fn config_loads_from_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "rate_bps = 750\nlog_format = \"json\"").unwrap();

    let config = ServiceConfig::from_toml_file(file.path()).unwrap();
    assert_eq!(config.rate_bps, 750);
    assert_eq!(config.log_format, "json");
    // Unspecified keys keep their defaults.
    assert_eq!(config.seconds_per_year, YEAR);
    assert_eq!(config.log_level, "info");
}

#[test]
fn state_survives_a_save_load_cycle() {
    let clock = Arc::new(NullClock::new(0));
    let transfer = Arc::new(NullTransfer::new());
    let service = service_with(Arc::clone(&clock), Arc::clone(&transfer));
    let erin = ParticipantId::new("erin");

    service.deposit(&erin, 1_000_000).unwrap();
    clock.advance(YEAR);
    service.withdraw(&erin, 400_000).unwrap();

    let store = NullPositionStore::new();
    service.save_to_store(&store).unwrap();

    let restored =
        StakingService::from_store(
            &store,
            Arc::new(NullTransfer::new()),
            Arc::clone(&clock) as Arc<dyn Clock>,
        )
        .unwrap();
    assert_eq!(restored.principal(&erin), 600_000);
    assert_eq!(restored.pending_reward(&erin).unwrap(), 100_000);
}

#[test]
fn events_are_not_emitted_for_failed_operations() {
    let clock = Arc::new(NullClock::new(0));
    let transfer = Arc::new(NullTransfer::new());
    let service = service_with(Arc::clone(&clock), Arc::clone(&transfer));
    let frank = ParticipantId::new("frank");

    let events = Arc::new(Mutex::new(Vec::<LedgerEvent>::new()));
    let sink = Arc::clone(&events);
    service.subscribe(Box::new(move |event| {
        sink.lock().unwrap().push(event.clone());
    }));

    assert!(service.deposit(&frank, 0).is_err());
    assert!(service.withdraw(&frank, 10).is_err());
    assert!(service.claim_reward(&frank).is_err());
    assert!(events.lock().unwrap().is_empty());
}
