//! Immutable queue demonstration.
//!
//! Builds nodes from mutable addresses, changes the addresses, and shows the
//! nodes are unaffected. Then runs a sequence of enqueues and dequeues and
//! prints every intermediate queue again at the end to show none of them
//! changed.
//!
//! Run with `RUST_LOG=immutable_queue=trace` to see the chain rebuilds.

use immutable_queue::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, DeepCopy)]
struct Address {
    country: String,
    city: String,
    zip_code: u32,
}

impl Address {
    fn new(country: &str, city: &str, zip_code: u32) -> Self {
        Self {
            country: country.to_string(),
            city: city.to_string(),
            zip_code,
        }
    }
}

fn main() -> Result<(), QueueError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("Immutable Queue Application\n");

    println!("Demonstration of immutable nodes");
    let mut berlin = Address::new("Germany", "Berlin", 1111);
    let mut paris = Address::new("France", "Paris", 2222);
    let first = Node::new(&berlin)?;
    let second = Node::with_previous(&paris, &first)?;
    println!("\tfirst={first:?}");
    println!("\tsecond={second:?}");

    berlin.city = "Frankfurt".to_string();
    paris.city = "Le Havre".to_string();
    println!("\tberlin={berlin:?}");
    println!("\tparis={paris:?}");
    println!("\tfirst={first:?}");
    println!("\tsecond={second:?}");

    println!("\nDemonstration of immutable queues");
    let queue0: PersistentQueue<Address> = PersistentQueue::new();
    let queue1 = queue0.enqueue(&Address::new("USA", "New York", 1234))?;
    let queue2 = queue1.enqueue(&Address::new("Japan", "Tokyo", 9876))?;
    let queue3 = queue2.dequeue()?;
    let queue4 = queue3.enqueue(&Address::new("England", "London", 2468))?;
    let queue5 = queue4.dequeue()?;
    let queue6 = queue5.dequeue()?;

    let queues = [
        &queue0, &queue1, &queue2, &queue3, &queue4, &queue5, &queue6,
    ];
    for (index, queue) in queues.iter().enumerate() {
        println!("\tqueue{index}={queue:?}");
    }

    tracing::info!(
        underflow = %queue6.dequeue().map_or_else(|error| error.to_string(), |_| String::new()),
        "dequeue on the drained queue is rejected"
    );

    println!("\nAfter enqueuing and dequeuing immutable queues");
    for (index, queue) in queues.iter().enumerate() {
        println!("\tqueue{index}={queue:?}");
    }

    Ok(())
}
