/// Tests for layout module
#[cfg(test)]
mod tests {
    use crate::fonts::{Font, text_width};
    use crate::layout::*;
    use crate::report::{Block, Document, PageFooter, Paragraph, RichText, Section, SectionKind, TableBuilder};
    use crate::style::StyleName;

    fn doc(blocks: Vec<Block>, footer: Option<PageFooter>) -> Document {
        let mut section = Section::new(SectionKind::ExecutiveSummary);
        for block in blocks {
            section.push(block);
        }
        Document { title: "Test".to_string(), sections: vec![section], footer }
    }

    fn body(text: &str) -> Block {
        Block::Paragraph(Paragraph::plain(StyleName::Body, text))
    }

    fn text_ops(page: &Page) -> Vec<(f32, f32, Font, f32, String)> {
        page.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, y, font, size, text, .. } => Some((*x, *y, *font, *size, text.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_letter_geometry() {
        let g = PageGeometry::letter();
        assert_eq!(g.width, 612.0);
        assert_eq!(g.height, 792.0);
        assert_eq!(g.frame_width(), 468.0);
        assert_eq!(g.frame_height(), 666.0);
        assert_eq!(g.frame_top(), 720.0);
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let laid = layout_document(&doc(vec![], None), &PageGeometry::letter()).unwrap();
        assert_eq!(laid.page_count(), 1);
        assert!(laid.pages[0].ops.is_empty());
    }

    #[test]
    fn test_page_break_on_empty_page_is_noop() {
        let laid =
            layout_document(&doc(vec![Block::PageBreak, body("first"), Block::PageBreak], None), &PageGeometry::letter())
                .unwrap();
        assert_eq!(laid.page_count(), 1);
    }

    #[test]
    fn test_forced_page_break() {
        let laid = layout_document(&doc(vec![body("first"), Block::PageBreak, body("second")], None), &PageGeometry::letter())
            .unwrap();
        assert_eq!(laid.page_count(), 2);
        assert_eq!(laid.pages[0].text_content(), "first");
        assert_eq!(laid.pages[1].text_content(), "second");
        assert_eq!(laid.pages[1].number, 2);
    }

    #[test]
    fn test_footer_resolved_after_layout() {
        let laid = layout_document(
            &doc(vec![body("one"), Block::PageBreak, body("two"), Block::PageBreak, body("three")], Some(PageFooter::page_numbers())),
            &PageGeometry::letter(),
        )
        .unwrap();

        assert_eq!(laid.page_count(), 3);
        assert!(!laid.pages[0].texts().any(|t| t.starts_with("Page")));
        assert!(laid.pages[1].texts().any(|t| t == "Page 2"));
        assert!(laid.pages[2].texts().any(|t| t == "Page 3"));

        // Centered at the footer baseline
        let (x, y, font, size, text) = text_ops(&laid.pages[1]).into_iter().find(|t| t.4 == "Page 2").unwrap();
        assert_eq!(y, 30.0);
        let width = text_width(&text, font, size);
        assert!((x + width / 2.0 - 306.0).abs() < 0.01);
    }

    #[test]
    fn test_first_line_sits_below_frame_top() {
        let laid = layout_document(&doc(vec![body("hello")], None), &PageGeometry::letter()).unwrap();
        let ops = text_ops(&laid.pages[0]);
        assert_eq!(ops.len(), 1);
        let (x, y, font, size, text) = &ops[0];
        assert_eq!(*x, 72.0);
        assert_eq!(*y, 720.0 - 11.0);
        assert_eq!(*font, Font::Helvetica);
        assert_eq!(*size, 11.0);
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_wrapped_text_stays_in_frame() {
        let long = "Temperature readings are within acceptable operational ranges. ".repeat(30);
        let laid = layout_document(&doc(vec![body(&long)], None), &PageGeometry::letter()).unwrap();
        let ops = text_ops(&laid.pages[0]);
        assert!(ops.len() > 10, "Expected many lines, got {}", ops.len());
        for (x, _, font, size, text) in ops {
            assert!(x >= 72.0 - 0.01);
            assert!(x + text_width(&text, font, size) <= 540.0 + 0.05, "'{}' overflows", text);
        }
    }

    #[test]
    fn test_justified_lines_reach_right_edge() {
        let long = "Consistent pressure readings suggest minimal leakage and optimal system configuration. ".repeat(4);
        let laid = layout_document(&doc(vec![body(&long)], None), &PageGeometry::letter()).unwrap();
        let ops = text_ops(&laid.pages[0]);
        let first_line_y = ops[0].1;
        let last_word_of_first_line = ops.iter().filter(|o| o.1 == first_line_y).last().unwrap();
        let right = last_word_of_first_line.0 + text_width(&last_word_of_first_line.4, last_word_of_first_line.2, 11.0);
        assert!((right - 540.0).abs() < 0.05, "first line ends at {}", right);
    }

    #[test]
    fn test_overlong_word_is_hard_split() {
        let word = "W".repeat(200);
        let laid = layout_document(&doc(vec![body(&word)], None), &PageGeometry::letter()).unwrap();
        let ops = text_ops(&laid.pages[0]);
        assert!(ops.len() > 1);
        let joined: String = ops.iter().map(|o| o.4.as_str()).collect();
        assert_eq!(joined, word);
        for (x, _, font, size, text) in ops {
            assert!(x + text_width(&text, font, size) <= 540.0 + 0.05);
        }
    }

    #[test]
    fn test_non_breaking_spaces_keep_indentation() {
        let line = "\u{a0}\u{a0}\"total_equipment\":\u{a0}5,";
        let block = Block::Paragraph(Paragraph::plain(StyleName::CodeBlock, line));
        let laid = layout_document(&doc(vec![block], None), &PageGeometry::letter()).unwrap();
        let ops = text_ops(&laid.pages[0]);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].4, line);
        assert_eq!(ops[0].0, 92.0);
        assert_eq!(ops[0].2, Font::Courier);
    }

    #[test]
    fn test_strong_span_uses_bold_face() {
        let content = RichText::new().strong("Generated:").text(" March 04, 2026");
        let block = Block::Paragraph(Paragraph::new(StyleName::Metadata, content));
        let laid = layout_document(&doc(vec![block], None), &PageGeometry::letter()).unwrap();
        let ops = text_ops(&laid.pages[0]);
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].2, Font::HelveticaBold);
        assert_eq!(ops[0].4, "Generated:");
        assert_eq!(ops[1].2, Font::Helvetica);
        assert_eq!(ops[1].4, "March 04, 2026");
        assert!(ops[1].0 > ops[0].0);
    }

    #[test]
    fn test_line_breaks_start_new_lines() {
        let content = RichText::new().text("one").line_break().text("two");
        let block = Block::Paragraph(Paragraph::new(StyleName::Body, content));
        let laid = layout_document(&doc(vec![block], None), &PageGeometry::letter()).unwrap();
        let ops = text_ops(&laid.pages[0]);
        assert_eq!(ops.len(), 2);
        assert!(ops[1].1 < ops[0].1);
    }

    #[test]
    fn test_long_table_splits_between_rows() {
        let mut builder = TableBuilder::new(["Timestamp", "Equipment"]);
        for i in 0..80 {
            builder = builder.row([format!("row {}", i), i.to_string()]);
        }
        let table = builder.build().unwrap();
        let laid = layout_document(&doc(vec![Block::Table(table)], None), &PageGeometry::letter()).unwrap();

        assert!(laid.page_count() >= 2);
        let all: Vec<String> = laid.pages.iter().flat_map(|p| p.texts().map(String::from).collect::<Vec<_>>()).collect();
        assert_eq!(all.iter().filter(|t| *t == "Timestamp").count(), 1);
        for i in 0..80 {
            assert!(all.contains(&format!("row {}", i)));
        }
        // Every page carries grid and band drawing
        for page in &laid.pages {
            assert!(page.ops.iter().any(|op| matches!(op, DrawOp::FillRect { .. })));
            assert!(page.ops.iter().any(|op| matches!(op, DrawOp::Line { .. })));
        }
    }

    #[test]
    fn test_over_tall_row_continues_on_next_pages() {
        let label = "X".repeat(6000);
        let table = TableBuilder::new(["Equipment Type", "Count", "Percentage"])
            .column_widths(&[2.5 * INCH, 1.5 * INCH, 1.5 * INCH])
            .row([label.as_str(), "1", "100.0%"])
            .build()
            .unwrap();
        let laid = layout_document(&doc(vec![Block::Table(table)], None), &PageGeometry::letter()).unwrap();

        assert!(laid.page_count() > 1);
        for page in &laid.pages {
            for (_, y, _, _, text) in text_ops(page) {
                assert!(y >= 54.0 - 0.01, "'{}' drawn below the bottom margin at y={}", text, y);
            }
            for op in &page.ops {
                if let DrawOp::FillRect { y, .. } = op {
                    assert!(*y >= 54.0 - 0.5, "row band extends below the bottom margin at y={}", y);
                }
            }
        }

        let drawn: usize = laid.pages.iter().flat_map(|p| p.texts()).map(|t| t.matches('X').count()).sum();
        assert_eq!(drawn, 6000);
        assert_eq!(laid.pages.iter().flat_map(|p| p.texts()).filter(|t| *t == "100.0%").count(), 1);
    }

    #[test]
    fn test_table_is_centered() {
        let table = TableBuilder::new(["A", "B"]).column_widths(&[100.0, 100.0]).row(["1", "2"]).build().unwrap();
        let laid = layout_document(&doc(vec![Block::Table(table)], None), &PageGeometry::letter()).unwrap();
        let band = laid.pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::FillRect { x, width, .. } => Some((*x, *width)),
                _ => None,
            })
            .unwrap();
        assert_eq!(band, (206.0, 200.0));
    }

    #[test]
    fn test_emblem_is_centered_in_frame() {
        let laid = layout_document(&doc(vec![Block::Emblem(StyleName::Emblem)], None), &PageGeometry::letter()).unwrap();
        match &laid.pages[0].ops[0] {
            DrawOp::Emblem { center_x, y, size, .. } => {
                assert_eq!(*center_x, 306.0);
                assert_eq!(*size, 72.0);
                assert_eq!(*y, 720.0 - 72.0);
            }
            other => panic!("Expected emblem, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_spacer_ends_page() {
        let laid = layout_document(&doc(vec![body("top"), Block::Spacer(700.0), body("next")], None), &PageGeometry::letter())
            .unwrap();
        assert_eq!(laid.page_count(), 2);
        assert_eq!(laid.pages[1].text_content(), "next");
    }

    #[test]
    fn test_zero_frame_is_render_error() {
        let geometry = PageGeometry { margin_left: 400.0, margin_right: 400.0, ..PageGeometry::letter() };
        let err = layout_document(&doc(vec![body("x")], None), &geometry).unwrap_err();
        assert!(err.to_string().starts_with("Render error"));
    }
}
