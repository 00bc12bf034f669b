//! CHR tile decoding and pattern-table rendering.
//!
//! A tile is 16 bytes: eight rows of the low bit plane followed by eight rows of the high bit
//! plane. Bit 7 of each row byte is the leftmost pixel.

pub const TILE_BYTES: usize = 16;
/// Tiles per pattern table (16 x 16).
pub const TABLE_TILES: usize = 256;
pub const TABLE_BYTES: usize = TILE_BYTES * TABLE_TILES;
/// Width and height of a rendered table in pixels.
pub const TABLE_DIM: usize = 128;

/// Grey ramp for pixel values 0-3 (0xRRGGBB).
pub const GREY_SHADES: [u32; 4] = [0x000000, 0x404040, 0x808080, 0xC0C0C0];

/// 8x8 pixel values (0-3), row-major.
pub type Tile = [[u8; 8]; 8];

/// Decode one 16-byte tile record. Missing bytes read as 0.
pub fn decode_tile(record: &[u8]) -> Tile {
    let byte_at = |i: usize| record.get(i).copied().unwrap_or(0);
    let mut tile = [[0; 8]; 8];

    for (y, row) in tile.iter_mut().enumerate() {
        let lo = byte_at(y);
        let hi = byte_at(y + 8);
        for (x, pixel) in row.iter_mut().enumerate() {
            let bit = 7 - x;
            *pixel = (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1);
        }
    }

    tile
}

/// Render one 4 KiB pattern table as a 128x128 0xRRGGBB buffer, tile `n` at column `n % 16`,
/// row `n / 16`.
pub fn render_pattern_table(table: &[u8]) -> Vec<u32> {
    let mut buffer = vec![0; TABLE_DIM * TABLE_DIM];

    for n in 0..TABLE_TILES {
        let start = (n * TILE_BYTES).min(table.len());
        let end = (start + TILE_BYTES).min(table.len());
        let tile = decode_tile(&table[start..end]);

        let (tile_x, tile_y) = (n % 16 * 8, n / 16 * 8);
        for (y, row) in tile.iter().enumerate() {
            for (x, pixel) in row.iter().enumerate() {
                buffer[(tile_y + y) * TABLE_DIM + tile_x + x] = GREY_SHADES[*pixel as usize];
            }
        }
    }

    buffer
}

/// Both pattern tables of an 8 KiB CHR bank side by side: a 256x128 buffer.
pub fn render_chr_bank(chr: &[u8]) -> Vec<u32> {
    let left = render_pattern_table(chr.get(..TABLE_BYTES).unwrap_or(chr));
    let right = render_pattern_table(chr.get(TABLE_BYTES..).unwrap_or(&[]));

    let mut buffer = Vec::with_capacity(2 * TABLE_DIM * TABLE_DIM);
    for y in 0..TABLE_DIM {
        buffer.extend_from_slice(&left[y * TABLE_DIM..(y + 1) * TABLE_DIM]);
        buffer.extend_from_slice(&right[y * TABLE_DIM..(y + 1) * TABLE_DIM]);
    }
    buffer
}
