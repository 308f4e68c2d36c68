pub mod printer_server;
