use blocking_mpmc::Queue;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

const MESSAGES: usize = 1_000_000;
const BUFFER_SIZE: usize = 1024;

fn main() {
    println!("Blocking MPMC Performance Test");
    println!("==============================\n");

    for (producers, consumers) in [(1, 1), (4, 1), (1, 4), (4, 4)] {
        println!(
            "{} Producer(s), {} Consumer(s) ({} messages):",
            producers, consumers, MESSAGES
        );
        let start = Instant::now();
        run(producers, consumers);
        let elapsed = start.elapsed();
        let throughput = MESSAGES as f64 / elapsed.as_secs_f64();
        println!("  Time: {:?}", elapsed);
        println!("  Throughput: {:.2} msgs/sec", throughput);
        println!("  Latency: {:.0} ns/op\n", elapsed.as_nanos() as f64 / MESSAGES as f64);
    }
}

fn run(producers: usize, consumers: usize) {
    let queue = Arc::new(Queue::<usize>::new(BUFFER_SIZE).expect("capacity is non-zero"));
    let per_producer = MESSAGES / producers;

    let senders: Vec<_> = (0..producers)
        .map(|p| {
            let q = queue.clone();
            thread::spawn(move || {
                for i in 0..per_producer {
                    q.enqueue(p * per_producer + i).unwrap();
                }
            })
        })
        .collect();

    let receivers: Vec<_> = (0..consumers)
        .map(|_| {
            let q = queue.clone();
            thread::spawn(move || q.iter().count())
        })
        .collect();

    for h in senders {
        h.join().unwrap();
    }
    queue.shutdown();

    let received: usize = receivers.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(received, per_producer * producers);
}
