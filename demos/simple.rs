//! Simple usage example

use blocking_mpmc::Queue;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
    blocking_mpmc::init_tracing();
    println!("Blocking MPMC - Simple Example\n");

    // Create a queue with 4 slots
    let queue = match Queue::<String>::new(4) {
        Ok(queue) => Arc::new(queue),
        Err(e) => {
            eprintln!("could not create queue: {e}");
            return;
        }
    };

    let producer_queue = queue.clone();
    let consumer_queue = queue.clone();

    // Producer blocks whenever the consumer falls 4 messages behind
    let producer = thread::spawn(move || {
        for i in 0..10 {
            let message = format!("Message {}", i);
            println!("Sending: {}", message);
            producer_queue.enqueue(message).ok();
        }
        println!("Producer finished, shutting the queue down");
        producer_queue.shutdown();
    });

    // Consumer stops on its own once the queue is shut down and drained
    let consumer = thread::spawn(move || {
        for message in consumer_queue.iter() {
            println!("Received: {}", message);
            thread::sleep(Duration::from_millis(100));
        }
        println!("Consumer finished!");
    });

    producer.join().unwrap();
    consumer.join().unwrap();

    println!("\nExample completed successfully!");
}
