// $ cargo test -p testsuite --test display
#![no_std]
#![no_main]

use freq_tracker as _; // memory layout + panic handler

#[defmt_test::tests]
mod tests {
    use defmt::{assert, assert_eq};
    use freq_tracker::{
        config::{BAR_HALF_HEIGHT, REQUESTED_LABEL, SERVICED_ROW},
        display::{
            bar_width, render_quantity, render_splash, DisplayMode, ModeCell, Panel, Surface,
            QUANTITY_TEXT_LEN,
        },
        Error,
    };
    use testsuite::{MockPanel, RecordingSurface};

    const FULL_SCALE: u32 = 4095 * 159;

    #[test]
    fn modes_cycle_off_numeric_bar() {
        assert_eq!(DisplayMode::Off.next(), DisplayMode::Numeric);
        assert_eq!(DisplayMode::Numeric.next(), DisplayMode::Bar);
        assert_eq!(DisplayMode::Bar.next(), DisplayMode::Off);
    }

    #[test]
    fn three_advances_return_to_start() {
        for start in [DisplayMode::Off, DisplayMode::Numeric, DisplayMode::Bar] {
            let cell = ModeCell::new(start);
            cell.advance();
            cell.advance();
            assert_eq!(cell.advance(), start);
            assert_eq!(cell.get(), start);
        }
    }

    #[test]
    fn bar_scales_with_full_scale() {
        assert_eq!(bar_width(0, FULL_SCALE, 128), 0);
        assert_eq!(bar_width(FULL_SCALE / 2, FULL_SCALE, 128), 63);
        assert_eq!(bar_width(FULL_SCALE, FULL_SCALE, 128), 128);
        assert_eq!(bar_width(FULL_SCALE * 3, FULL_SCALE, 128), 128);
        assert_eq!(bar_width(10, 0, 128), 0);
    }

    #[test]
    fn off_draws_nothing() {
        let mut surface = RecordingSurface::default();
        render_quantity(&mut surface, 20, "Reqst", 1000, DisplayMode::Off, FULL_SCALE).unwrap();
        assert!(surface.texts.is_empty());
        assert!(surface.bars.is_empty());
    }

    #[test]
    fn numeric_draws_label_and_value() {
        let mut surface = RecordingSurface::default();
        render_quantity(&mut surface, 20, "Reqst", 159_000, DisplayMode::Numeric, FULL_SCALE)
            .unwrap();
        assert_eq!(surface.text_at(20), Some("Reqst: 159000"));
        assert!(surface.bars.is_empty());
    }

    #[test]
    fn text_buffer_fits_longest_quantity_exactly() {
        let mut surface = RecordingSurface::default();
        render_quantity(&mut surface, 20, REQUESTED_LABEL, u32::MAX, DisplayMode::Numeric, 1)
            .unwrap();
        assert_eq!(surface.text_at(20), Some("Reqst: 4294967295"));
        assert_eq!(QUANTITY_TEXT_LEN, "Reqst: 4294967295".len());
    }

    #[test]
    fn oversized_label_is_rejected() {
        let mut surface = RecordingSurface::default();
        assert_eq!(
            render_quantity(&mut surface, 20, "Requested", u32::MAX, DisplayMode::Numeric, 1),
            Err(Error::TextOverflow)
        );
        assert!(surface.texts.is_empty());
    }

    #[test]
    fn bar_draws_scaled_width() {
        let mut surface = RecordingSurface::default();
        render_quantity(&mut surface, 35, "Srv", FULL_SCALE / 4, DisplayMode::Bar, FULL_SCALE)
            .unwrap();
        assert_eq!(surface.bar_at(35), Some(31));
        assert!(surface.texts.is_empty());
    }

    #[test]
    fn splash_clears_then_draws_banner() {
        let mut surface = RecordingSurface::default();
        render_splash(&mut surface).unwrap();
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.banners, 1);
        assert_eq!(surface.presents, 1);
    }

    #[test]
    fn panel_fills_bar_pixels() {
        let mut panel = Panel::new(MockPanel::new());
        panel.fill_bar(SERVICED_ROW, 10).unwrap();
        let mock = panel.target();
        assert!(mock.is_on(0, SERVICED_ROW));
        assert!(mock.is_on(9, SERVICED_ROW - BAR_HALF_HEIGHT));
        assert!(mock.is_on(9, SERVICED_ROW + BAR_HALF_HEIGHT));
        assert!(!mock.is_on(10, SERVICED_ROW));
        assert!(!mock.is_on(0, SERVICED_ROW + BAR_HALF_HEIGHT + 1));
    }

    #[test]
    fn panel_zero_bar_draws_nothing() {
        let mut panel = Panel::new(MockPanel::new());
        panel.fill_bar(SERVICED_ROW, 0).unwrap();
        assert!(!panel.target().is_on(0, SERVICED_ROW));
    }

    #[test]
    fn panel_clear_blanks_everything() {
        let mut panel = Panel::new(MockPanel::new());
        panel.fill_bar(SERVICED_ROW, 40).unwrap();
        panel.clear().unwrap();
        assert!(!panel.target().is_on(0, SERVICED_ROW));
        assert!(!panel.target().is_on(39, SERVICED_ROW));
    }

    #[test]
    fn panel_banner_fills_top_band() {
        let mut panel = Panel::new(MockPanel::new());
        panel.draw_banner("Hi").unwrap();
        // Corners of the band are outside the centred title.
        assert!(panel.target().is_on(0, 0));
        assert!(panel.target().is_on(63, 9));
        assert!(!panel.target().is_on(0, 10));
    }

    #[test]
    fn panel_text_lands_on_its_row() {
        let mut panel = Panel::new(MockPanel::new());
        panel.draw_centered_text(20, "8").unwrap();
        let lit_rows = |rows: core::ops::Range<i32>| {
            rows.into_iter()
                .any(|y| (0..64).any(|x| panel.target().is_on(x, y)))
        };
        // FONT_6X10 glyphs are centred vertically on the row.
        assert!(lit_rows(15..26));
        assert!(!lit_rows(0..15));
        assert!(!lit_rows(26..64));
    }
}
