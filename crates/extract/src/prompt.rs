pub const NER_PROMPT: &str = r#"
Bạn là chuyên gia gán nhãn dữ liệu tai nạn giao thông (NER).
Nhiệm vụ: Trích xuất chính xác thực thể từ văn bản theo các nhãn sau:

1. PER_DRIVER: Chỉ gán cho từ chỉ người lái (ví dụ: "tài xế", "người lái", "lái xe", "tài xế Nguyễn Văn A").
2. PER_VICTIM: Nạn nhân (người chết/bị thương).
3. LOC: Địa điểm CỤ THỂ (Tên đường, Quốc lộ, Tỉnh, Thành phố, Cầu, Km số...).
4. ORG: Tổ chức (Công an, Bệnh viện, Công ty...).
5. VEH: Phương tiện (Xe máy, Ô tô, Xe tải, Xe đầu kéo, Container...).
6. TIME: Thời gian (Giờ, ngày).
7. EVENT: Sự kiện (vụ va chạm, lật xe...).
8. CAUSE: Nguyên nhân (mất lái, nổ lốp, say rượu...).
9. CONSEQUENCE: Hậu quả (tử vong, hư hỏng...).

QUY TẮC CHẶT CHẼ (BẮT BUỘC TUÂN THỦ):
1. KHÔNG GÁN CHỒNG (NO OVERLAP): Các thực thể không được chứa nhau.
   - Sai: {"label": "PER_DRIVER", "text": "tài xế xe container"} (Gộp chung người và xe)
   - Đúng: Tách riêng ra -> [{"label": "PER_DRIVER", "text": "tài xế"}, {"label": "VEH", "text": "xe container"}]

2. KHÔNG GÁN LOC MƠ HỒ:
   - Tuyệt đối KHÔNG gán nhãn LOC cho các từ chung chung như: "hiện trường", "nơi này", "ở đây", "đoạn đường trên", "khu vực".
   - Chỉ gán LOC cho địa danh có tên riêng hoặc định danh cụ thể như: "Quốc lộ 1A", "Cầu Thăng Long", "Hà Nội", "Km số 15",  "cao tốc Pháp Vân - Cầu Giẽ", "tỉnh Lạng Sơn".

3. NGUYÊN NHÂN CŨNG BAO GỒM VẬN TỐC:
    - Ví dụ: "chạy quá tốc độ", "vượt ẩu", "phóng nhanh", "đi không đúng phần đường", vượt quá 70/80/90 km/h...

4. TRÍCH XUẤT CHÍNH XÁC:
   - "text" phải đúng y hệt trong văn bản gốc.

YÊU CẦU OUTPUT (JSON):
Trả về danh sách JSON gồm "label" và "text".
Ví dụ:
[
  {"label": "PER_DRIVER", "text": "tài xế"},
  {"label": "VEH", "text": "xe đầu kéo"},
  {"label": "LOC", "text": "Hà Nội"}
]
Nếu không có thực thể, trả về [].
"#;

/// Labels the prompt asks for. Not enforced on model output.
pub const LABELS: [&str; 9] = [
    "PER_DRIVER",
    "PER_VICTIM",
    "LOC",
    "ORG",
    "VEH",
    "TIME",
    "EVENT",
    "CAUSE",
    "CONSEQUENCE",
];

pub fn build_ner_prompt(input_text: &str) -> String {
    format!("{}\n\n---\nVăn bản:\n\"{}\"", NER_PROMPT, input_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_wraps_input_after_separator() {
        let prompt = build_ner_prompt("xe tải lật trên Quốc lộ 1A");
        assert!(prompt.starts_with(NER_PROMPT));
        assert!(prompt.ends_with("\n\n---\nVăn bản:\n\"xe tải lật trên Quốc lộ 1A\""));
    }

    #[test]
    fn test_prompt_mentions_every_label() {
        for label in LABELS {
            assert!(NER_PROMPT.contains(label), "missing {label}");
        }
    }
}
