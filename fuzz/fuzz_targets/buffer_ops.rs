#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use padbuf::{BufferPool, PaddedBuffer, WORD_SIZE};

// Each input byte pair is one operation: (opcode, size). Results are checked
// against a VecDeque holding the expected content.
fuzz_target!(|data: Vec<u8>| {
    let pool = BufferPool::new();
    let mut model: VecDeque<u8> = VecDeque::new();
    let pad = data.first().copied().unwrap_or(0) as usize;
    let mut buf = pool.acquire(0, 16, pad);

    for (step, pair) in data.chunks_exact(2).enumerate() {
        let size = pair[1] as usize % 64;
        let fill = step as u8;
        let piece = vec![fill; size];

        buf = match pair[0] % 4 {
            0 => {
                model.extend(piece.iter().copied());
                buf.append(&piece)
            }
            1 => {
                for &b in piece.iter().rev() {
                    model.push_front(b);
                }
                let room = buf.remaining_padding();
                let fast = size % WORD_SIZE == 0 && size <= room;
                let buf = buf.prepend(&piece);
                if fast {
                    assert_eq!(buf.remaining_padding(), room - size);
                } else {
                    assert_eq!(buf.remaining_padding(), 0);
                }
                buf
            }
            2 => {
                let words = vec![fill; size / WORD_SIZE * WORD_SIZE];
                for &b in words.iter().rev() {
                    model.push_front(b);
                }
                buf.prepend(&words)
            }
            _ => {
                // Recycle: content restarts from the model's current state.
                pool.release(buf);
                let content: Vec<u8> = model.iter().copied().collect();
                pool.acquire(0, content.len(), size).append(&content)
            }
        };

        assert_eq!(buf.remaining_padding() % WORD_SIZE, 0);
        assert!(buf.len() <= buf.capacity());
        assert!(buf.iter().eq(model.iter()));
    }

    pool.release(buf);
});
