use blocking_mpmc::Queue;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
    blocking_mpmc::init_tracing();
    println!("Work Queue Example\n");

    const NUM_WORKERS: usize = 4;
    const NUM_JOBS: usize = 20;

    let jobs = Arc::new(Queue::<String>::new(8).expect("capacity is non-zero"));
    let results = Arc::new(Queue::<String>::new(NUM_JOBS).expect("capacity is non-zero"));

    let jobs_tx = jobs.clone();
    let producer = thread::spawn(move || {
        for i in 0..NUM_JOBS {
            let job = format!("Job-{:02}", i);
            println!("📝 Enqueued: {}", job);
            jobs_tx.enqueue(job).ok();
            thread::sleep(Duration::from_millis(50));
        }
        jobs_tx.shutdown();
        println!("✅ All jobs enqueued!");
    });

    let mut workers = vec![];
    for worker_id in 0..NUM_WORKERS {
        let jobs_rx = jobs.clone();
        let results_tx = results.clone();

        workers.push(thread::spawn(move || {
            let mut processed = 0;
            for job in jobs_rx.iter() {
                println!("🔨 Worker {} processing: {}", worker_id, job);
                thread::sleep(Duration::from_millis(200));

                let result = format!("{} -> completed by worker {}", job, worker_id);
                results_tx.enqueue(result).ok();
                processed += 1;
            }
            println!("Worker {} finished ({} jobs)", worker_id, processed);
        }));
    }

    producer.join().unwrap();
    for worker in workers {
        worker.join().unwrap();
    }
    // Every worker has exited, so no more results can arrive.
    results.shutdown();

    let mut collected = 0;
    for result in results.iter() {
        println!("✨ Result: {}", result);
        collected += 1;
    }
    assert_eq!(collected, NUM_JOBS);

    println!("\n🎉 Work queue example completed!");
}
