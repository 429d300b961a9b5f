//! Framing a payload after it is encoded, with pooled buffers.
//!
//! Run with:
//!     cargo run --example framing

use padbuf::{BufferPool, PaddedBuffer, WORD_SIZE};

/// Reserve enough padding for a length prefix and a message tag.
const HEADER_ROOM: usize = 2 * size_of::<u64>();

fn encode(pool: &BufferPool, tag: u64, fields: &[&str]) -> PaddedBuffer {
    let mut body = pool.acquire(0, 256, HEADER_ROOM);
    for field in fields {
        body = body.append(field.as_bytes()).append(b";");
    }

    // Only now is the body length known.
    let len = body.len() as u64;
    body.prepend(&len.to_be_bytes()).prepend(&tag.to_be_bytes())
}

fn main() {
    let pool = BufferPool::new();

    println!("word size: {} bytes\n", WORD_SIZE);

    let messages: [(u64, &[&str]); 3] = [
        (1, &["hello", "world"]),
        (2, &["ping"]),
        (3, &["a", "much", "longer", "message", "with", "many", "fields"]),
    ];

    for (tag, fields) in messages {
        let frame = encode(&pool, tag, fields);
        println!(
            "frame tag={} len={} padding_left={} bytes={:02x?}",
            tag,
            frame.len(),
            frame.remaining_padding(),
            &frame[..16]
        );
        pool.release(frame);
    }

    let stats = pool.stats();
    println!(
        "\npool: {} hits, {} misses, hit rate {:.0}%",
        stats.hits,
        stats.misses,
        stats.hit_rate() * 100.0
    );
}
