//! Response Writer Port - 响应输出
//!
//! Dispatcher 只通过该接口设置状态码、内容类型并写出响应体，
//! 具体的传输层实现在 infrastructure/http

use super::ViewError;

pub trait ResponseWriter {
    /// 设置 HTTP 状态码（默认 200）
    fn set_status_code(&mut self, code: u16);

    fn status_code(&self) -> u16;

    /// 设置 Content-Type
    fn set_content_type(&mut self, mime: &str);

    /// 设置额外的响应头（如重定向的 Location）
    fn set_header(&mut self, name: &str, value: &str);

    /// 渲染命名视图为字符串，不写入响应体
    fn view(&self, name: &str) -> Result<String, ViewError>;

    /// 追加响应体
    fn write(&mut self, chunk: &str);

    /// 丢弃已写入的响应体
    fn clear_body(&mut self);

    /// 丢弃已设置的额外响应头
    fn clear_headers(&mut self);
}
