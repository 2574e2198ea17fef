//! Global allocator configuration.
//!
//! Uses mimalloc instead of the system allocator; the encrypt/decrypt path
//! allocates whole-file buffers plus many small ones, which mimalloc handles
//! noticeably better.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
