// Host-side tests for the last-write-wins signal cells.

use std::sync::{Arc, Barrier};
use std::thread;

use particles_core::{AudioSignal, GestureSignal, LatestCell, SignalCells};

#[test]
fn last_write_wins() {
    let cell = LatestCell::new(0u32);
    cell.publish(1);
    cell.publish(2);
    cell.publish(3);
    assert_eq!(cell.latest(), 3);
    // reads do not consume
    assert_eq!(cell.latest(), 3);
}

#[test]
fn clones_share_the_slot() {
    let producer = LatestCell::new(GestureSignal::NEUTRAL);
    let consumer = producer.clone();
    let g = GestureSignal {
        zoom: 2.0,
        rotation: 0.5,
        active: true,
    };
    producer.publish(g);
    assert_eq!(consumer.latest(), g);
}

#[test]
fn readers_never_see_torn_values() {
    // every write keeps zoom == rotation, so a torn read would break it
    let cell = LatestCell::new(GestureSignal::NEUTRAL);
    cell.publish(GestureSignal {
        zoom: 0.0,
        rotation: 0.0,
        active: true,
    });
    let barrier = Arc::new(Barrier::new(2));
    let writer = {
        let cell = cell.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for i in 0..10_000 {
                let v = i as f32;
                cell.publish(GestureSignal {
                    zoom: v,
                    rotation: v,
                    active: true,
                });
            }
        })
    };
    barrier.wait();
    for _ in 0..10_000 {
        let g = cell.latest();
        assert_eq!(g.zoom, g.rotation);
    }
    writer.join().unwrap();
    assert_eq!(cell.latest().zoom, 9_999.0);
}

#[test]
fn cells_start_and_reset_neutral() {
    let cells = SignalCells::default();
    assert_eq!(cells.gesture.latest(), GestureSignal::NEUTRAL);
    assert_eq!(cells.audio.latest(), AudioSignal::NEUTRAL);
    cells.audio.publish(AudioSignal {
        volume: 0.9,
        beat: true,
    });
    cells.reset();
    assert_eq!(cells.audio.latest(), AudioSignal::NEUTRAL);
}
